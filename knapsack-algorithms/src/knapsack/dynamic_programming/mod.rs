//! Exact 0/1 knapsack by bottom-up dynamic programming.
//!
//! Two `(N+1) x (C+1)` tables are built per call: `values[i][c]` holds the best
//! value reachable with the first `i` items under weight `c`, and `keep[i][c]`
//! records whether that optimum takes item `i`. The selection is recovered by
//! walking `keep` backwards from `(N, C)`.
//!
//! Time and space are O(N * C), so capacity must stay reasonably small.
use anyhow::{anyhow, Result};
use knapsack_challenges::knapsack::{validate_items, Challenge, Packable, Solution};
use log::{debug, trace};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Indices in backtrack order, i.e. decreasing original index
    pub indices: Vec<usize>,
    pub total_weight: i64,
    pub total_value: i64,
}

struct Tables {
    width: usize,
    values: Vec<i64>,
    keep: Vec<bool>,
}

impl Tables {
    fn allocate(num_items: usize, capacity: usize) -> Result<Self> {
        let width = capacity
            .checked_add(1)
            .ok_or_else(|| anyhow!("Capacity ({}) is too large", capacity))?;
        let cells = (num_items + 1)
            .checked_mul(width)
            .ok_or_else(|| anyhow!("Table of {} x {} cells overflows", num_items + 1, width))?;

        let mut values = Vec::new();
        values
            .try_reserve_exact(cells)
            .map_err(|e| anyhow!("Unable to allocate value table ({} cells): {}", cells, e))?;
        values.resize(cells, 0);

        let mut keep = Vec::new();
        keep.try_reserve_exact(cells)
            .map_err(|e| anyhow!("Unable to allocate keep table ({} cells): {}", cells, e))?;
        keep.resize(cells, false);

        Ok(Self {
            width,
            values,
            keep,
        })
    }

    fn value(&self, i: usize, c: usize) -> i64 {
        self.values[i * self.width + c]
    }

    fn keep(&self, i: usize, c: usize) -> bool {
        self.keep[i * self.width + c]
    }

    fn set(&mut self, i: usize, c: usize, value: i64, keep: bool) {
        self.values[i * self.width + c] = value;
        self.keep[i * self.width + c] = keep;
    }
}

fn to_usize(n: i64) -> Result<usize> {
    usize::try_from(n).map_err(|_| anyhow!("Value ({}) does not fit in usize", n))
}

fn fill_tables<P: Packable>(items: &[P], capacity: usize) -> Result<Tables> {
    let mut tables = Tables::allocate(items.len(), capacity)?;

    for i in 1..=items.len() {
        let item = &items[i - 1];
        let weight = item.weight();
        let value = item.value();
        for c in 1..=capacity {
            let baseline = tables.value(i - 1, c);

            // Item does not fit: carry the previous row forward
            if weight > c as i64 {
                tables.set(i, c, baseline, false);
                continue;
            }

            let remaining = c - weight as usize;
            let candidate = value.checked_add(tables.value(i - 1, remaining)).ok_or_else(|| {
                anyhow!("Total value overflowed at item ({}), capacity ({})", i - 1, c)
            })?;

            // Ties leave the item out
            if candidate > baseline {
                tables.set(i, c, candidate, true);
            } else {
                tables.set(i, c, baseline, false);
            }
        }
        trace!("row {}: best value {}", i, tables.value(i, capacity));
    }

    Ok(tables)
}

fn backtrack<P: Packable>(items: &[P], tables: &Tables, capacity: usize) -> Selection {
    let mut selection = Selection::default();
    let mut c = capacity;
    for i in (1..=items.len()).rev() {
        if tables.keep(i, c) {
            let item = &items[i - 1];
            selection.indices.push(i - 1);
            selection.total_weight += item.weight();
            selection.total_value += item.value();
            c -= item.weight() as usize;
        }
    }
    selection
}

/// Solves the 0/1 knapsack problem and returns the selection with its totals.
///
/// Fails on negative capacity, negative item fields, arithmetic overflow or
/// when the tables cannot be allocated. No partial result is returned.
pub fn solve_with_value<P: Packable>(items: &[P], capacity: i64) -> Result<Selection> {
    validate_items(items, capacity)?;
    let capacity = to_usize(capacity)?;
    if items.is_empty() || capacity == 0 {
        return Ok(Selection::default());
    }

    let tables = fill_tables(items, capacity)?;
    let selection = backtrack(items, &tables, capacity);
    debug!(
        "solved knapsack: num_items={}, capacity={}, selected={}, total_weight={}, total_value={}",
        items.len(),
        capacity,
        selection.indices.len(),
        selection.total_weight,
        selection.total_value
    );
    debug_assert_eq!(selection.total_value, tables.value(items.len(), capacity));
    Ok(selection)
}

/// Returns the indices of the items to pack, in decreasing index order.
pub fn solve<P: Packable>(items: &[P], capacity: i64) -> Result<Vec<usize>> {
    Ok(solve_with_value(items, capacity)?.indices)
}

pub fn optimal_value<P: Packable>(items: &[P], capacity: i64) -> Result<i64> {
    Ok(solve_with_value(items, capacity)?.total_value)
}

pub fn solve_challenge(challenge: &Challenge) -> Result<Option<Solution>> {
    let indices = solve(&challenge.items, challenge.capacity)?;
    Ok(Some(Solution { items: indices }))
}
