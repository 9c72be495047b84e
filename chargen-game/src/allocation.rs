//! Budgeted dot distribution across trait slots.

use std::collections::BTreeMap;

use crate::bounded::BoundedTrait;
use crate::constants::DEFAULT_TRAIT_LIMIT;
use crate::engine::DiceEngine;
use crate::error::{ChargenError, Result};
use crate::numbers::{u32_to_u8, usize_to_u32};

/// Randomly place `total_dots` one at a time over `slot_count` slots that all
/// start at `base`.
///
/// Each dot goes to a uniformly drawn slot; a slot already at `limit` is
/// skipped and the dot is redrawn. `None` leaves slots capped only by the
/// `u8` rating range. The returned ratings sum to
/// `base * slot_count + total_dots`.
///
/// # Errors
///
/// Returns [`ChargenError::BudgetExceedsCapacity`] when the dots cannot fit
/// under the cap; checking first keeps the placement loop finite.
pub fn spread(
    engine: &mut DiceEngine,
    slot_count: usize,
    total_dots: u32,
    base: u8,
    limit: Option<u8>,
) -> Result<Vec<BoundedTrait>> {
    let cap = limit.unwrap_or(u8::MAX);
    let capacity = usize_to_u32(slot_count).saturating_mul(u32::from(cap.saturating_sub(base)));
    if total_dots > 0 && capacity < total_dots {
        return Err(ChargenError::BudgetExceedsCapacity {
            slots: slot_count,
            dots: total_dots,
            limit: cap,
        });
    }

    let ceiling = limit.map_or_else(
        || u32_to_u8(u32::from(base) + total_dots),
        |cap| cap.max(base),
    );
    let ceiling = ceiling.max(DEFAULT_TRAIT_LIMIT);

    let mut slots = vec![base; slot_count];
    let mut remaining = total_dots;
    while remaining > 0 {
        let n = engine.index(slot_count);
        if slots[n] >= cap {
            continue;
        }
        slots[n] += 1;
        remaining -= 1;
    }

    slots
        .into_iter()
        .map(|dots| BoundedTrait::with_limit(dots, ceiling))
        .collect()
}

/// Split `keys` into `groups` equal contiguous blocks, shuffle which budget
/// lands on which block, and [`spread`] each budget over its block.
///
/// # Errors
///
/// Returns [`ChargenError::InvalidGrouping`] when the keys do not divide into
/// one block per budget, and propagates [`spread`] failures.
pub fn spend(
    engine: &mut DiceEngine,
    keys: &[&str],
    budgets: &[u32],
    groups: usize,
    base: u8,
    limit: Option<u8>,
) -> Result<BTreeMap<String, BoundedTrait>> {
    if groups == 0 || keys.len() % groups != 0 || budgets.len() != groups {
        return Err(ChargenError::InvalidGrouping {
            keys: keys.len(),
            groups,
        });
    }
    let size = keys.len() / groups;

    let mut traits = BTreeMap::new();
    for (block, total) in keys.chunks(size).zip(engine.shuffled(budgets)) {
        let dots = spread(engine, size, total, base, limit)?;
        for (key, rating) in block.iter().zip(dots) {
            traits.insert((*key).to_string(), rating);
        }
    }
    Ok(traits)
}
