pub mod baselines;
use anyhow::{anyhow, Result};
use log::debug;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};
use std::collections::HashSet;

/// Anything that can be placed in a knapsack.
///
/// Solvers only ever read these two accessors and never mutate the item.
/// Both are expected to be non-negative; solvers reject negative values.
pub trait Packable {
    fn weight(&self) -> i64;
    fn value(&self) -> i64;
}

impl<P: Packable + ?Sized> Packable for &P {
    fn weight(&self) -> i64 {
        (**self).weight()
    }

    fn value(&self) -> i64 {
        (**self).value()
    }
}

/// `(weight, value)`
impl Packable for (i64, i64) {
    fn weight(&self) -> i64 {
        self.0
    }

    fn value(&self) -> i64 {
        self.1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: i64,
    pub value: i64,
}

impl Item {
    pub fn new(weight: i64, value: i64) -> Self {
        Self { weight, value }
    }
}

impl Packable for Item {
    fn weight(&self) -> i64 {
        self.weight
    }

    fn value(&self) -> i64 {
        self.value
    }
}

/// Checks the non-negativity preconditions shared by every solver.
pub fn validate_items<P: Packable>(items: &[P], capacity: i64) -> Result<()> {
    if capacity < 0 {
        return Err(anyhow!("Invalid capacity ({}): must be >= 0", capacity));
    }
    for (i, item) in items.iter().enumerate() {
        if item.weight() < 0 {
            return Err(anyhow!(
                "Item ({}) has invalid weight ({}): must be >= 0",
                i,
                item.weight()
            ));
        }
        if item.value() < 0 {
            return Err(anyhow!(
                "Item ({}) has invalid value ({}): must be >= 0",
                i,
                item.value()
            ));
        }
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    pub num_items: usize,
    pub max_item_weight: u32,
    pub max_item_value: u32,
    /// Capacity as a percentage of the total item weight
    pub budget: u32,
}

impl Difficulty {
    pub fn validate(&self) -> Result<()> {
        if self.num_items == 0 {
            return Err(anyhow!("num_items must be greater than 0"));
        }
        if self.max_item_weight == 0 {
            return Err(anyhow!("max_item_weight must be greater than 0"));
        }
        if self.budget > 100 {
            return Err(anyhow!("budget ({}) must be at most 100", self.budget));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub items: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub difficulty: Difficulty,
    pub items: Vec<Item>,
    pub capacity: i64,
}

impl Challenge {
    pub fn generate_instance(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Self> {
        difficulty.validate()?;
        let mut rng = SmallRng::from_seed(seed.clone());

        // Weights in [1, max_item_weight], values in [0, max_item_value]
        let items: Vec<Item> = (0..difficulty.num_items)
            .map(|_| {
                let weight = rng.gen_range(1..=difficulty.max_item_weight) as i64;
                let value = rng.gen_range(0..=difficulty.max_item_value) as i64;
                Item::new(weight, value)
            })
            .collect();

        let total_weight = items.iter().map(|item| item.weight).sum::<i64>();
        let capacity = total_weight * difficulty.budget as i64 / 100;
        debug!(
            "generated challenge: num_items={}, total_weight={}, capacity={}",
            items.len(),
            total_weight,
            capacity
        );

        Ok(Challenge {
            seed: seed.clone(),
            difficulty: difficulty.clone(),
            items,
            capacity,
        })
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn evaluate_total_value(&self, solution: &Solution) -> Result<i64> {
        validate_items(&self.items, self.capacity)?;
        let selected_items: HashSet<usize> = solution.items.iter().cloned().collect();
        if selected_items.len() != solution.items.len() {
            return Err(anyhow!("Duplicate items selected."));
        }

        let selected = solution
            .items
            .iter()
            .map(|&item| {
                self.items
                    .get(item)
                    .ok_or_else(|| anyhow!("Item ({}) is out of bounds", item))
            })
            .collect::<Result<Vec<_>>>()?;

        let total_weight = selected
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.weight))
            .ok_or_else(|| anyhow!("Total weight overflowed"))?;
        if total_weight > self.capacity {
            return Err(anyhow!(
                "Total weight ({}) exceeded capacity ({})",
                total_weight,
                self.capacity
            ));
        }

        selected
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.value))
            .ok_or_else(|| anyhow!("Total value overflowed"))
    }

    pub fn verify_solution(&self, solution: &Solution, optimal_value: i64) -> Result<()> {
        let total_value = self.evaluate_total_value(solution)?;
        if total_value == optimal_value {
            Ok(())
        } else {
            Err(anyhow!(
                "Total value ({}) does not match optimal value ({})",
                total_value,
                optimal_value
            ))
        }
    }

    /// Exhaustive reference solution. Only feasible for small instances.
    pub fn compute_brute_force_baseline(&self) -> Result<Solution> {
        baselines::brute_force::solve(&self.items, self.capacity)
    }
}
