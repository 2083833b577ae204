//! Bounded spell-slot and hit-point arithmetic

use crate::domain::entities::{SlotPair, SpellSlots};
use crate::domain::value_objects::{SlotField, SpellLevel};

fn offset(value: u32, delta: i64) -> i64 {
    i64::from(value) + delta
}

fn to_count(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Adjust one half of a slot pair
///
/// Current is clamped to `[0, max]`. Max never drops below zero, and current
/// is pulled down to a lowered max.
pub fn adjust_slot(pair: SlotPair, field: SlotField, delta: i32) -> SlotPair {
    let delta = i64::from(delta);
    match field {
        SlotField::Current => SlotPair {
            current: to_count(offset(pair.current, delta).clamp(0, i64::from(pair.max))),
            max: pair.max,
        },
        SlotField::Max => {
            let max = to_count(offset(pair.max, delta));
            SlotPair {
                current: pair.current.min(max),
                max,
            }
        }
    }
}

/// Copy of `slots` with one level adjusted; a level with no entry starts at 0/0
pub fn adjust_slots(slots: &SpellSlots, level: SpellLevel, field: SlotField, delta: i32) -> SpellSlots {
    let mut updated = slots.clone();
    let pair = slots.get(level).unwrap_or_default();
    updated.set(level, adjust_slot(pair, field, delta));
    updated
}

/// Current hit points moved by `delta`, clamped to `[0, max]`
pub fn adjust_hit_points(current: u32, max: u32, delta: i32) -> u32 {
    to_count(offset(current, i64::from(delta)).clamp(0, i64::from(max)))
}
