use crate::knapsack::{validate_items, Packable, Solution};
use anyhow::{anyhow, Result};

pub const MAX_BRUTE_FORCE_ITEMS: usize = 20;

/// Enumerates every subset of `items` and returns the most valuable one that fits.
///
/// Ties keep the first subset found in mask order. Indices are ascending.
pub fn solve<P: Packable>(items: &[P], capacity: i64) -> Result<Solution> {
    validate_items(items, capacity)?;
    if items.len() > MAX_BRUTE_FORCE_ITEMS {
        return Err(anyhow!(
            "Brute force supports at most {} items, got {}",
            MAX_BRUTE_FORCE_ITEMS,
            items.len()
        ));
    }

    let mut best_mask = 0u32;
    let mut best_value = 0i64;
    for mask in 0..(1u32 << items.len()) {
        // None once a running sum overflows; an overflowed weight never fits
        let mut total_weight = Some(0i64);
        let mut total_value = Some(0i64);
        for (i, item) in items.iter().enumerate() {
            if mask & (1 << i) != 0 {
                total_weight = total_weight.and_then(|w| w.checked_add(item.weight()));
                total_value = total_value.and_then(|v| v.checked_add(item.value()));
            }
        }
        if !total_weight.is_some_and(|w| w <= capacity) {
            continue;
        }
        let total_value = total_value
            .ok_or_else(|| anyhow!("Total value overflowed for subset ({:#b})", mask))?;
        if total_value > best_value {
            best_mask = mask;
            best_value = total_value;
        }
    }

    Ok(Solution {
        items: (0..items.len())
            .filter(|&i| best_mask & (1 << i) != 0)
            .collect(),
    })
}
