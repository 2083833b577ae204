//! Grimoire aggregation - a character's known spells and slot resources

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::domain::entities::{names_match, Character, Spell};
use crate::domain::value_objects::SpellLevel;

use super::spell_filter::compare_names;

/// Remaining and maximum slots for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub level: SpellLevel,
    pub current: u32,
    pub max: u32,
}

/// Known spells resolved against the catalog, grouped by level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grimoire {
    pub spells_by_level: BTreeMap<SpellLevel, Vec<Spell>>,
    /// Ascending by level
    pub slots: Vec<SlotSummary>,
}

impl Grimoire {
    /// Resolve `character`'s known spells by name; names missing from the
    /// catalog are skipped.
    pub fn aggregate(character: &Character, catalog: &[Spell]) -> Self {
        let mut spells_by_level: BTreeMap<SpellLevel, Vec<Spell>> = BTreeMap::new();
        let mut seen = HashSet::new();

        for known in &character.known_spells {
            match catalog.iter().find(|spell| names_match(&spell.name, &known.name)) {
                Some(spell) => {
                    if seen.insert(spell.id.clone()) {
                        spells_by_level
                            .entry(spell.level)
                            .or_default()
                            .push(spell.clone());
                    }
                }
                None => {
                    debug!(
                        character_id = %character.id,
                        spell = %known.name,
                        "Known spell not in catalog, skipping"
                    );
                }
            }
        }

        for spells in spells_by_level.values_mut() {
            spells.sort_by(|a, b| compare_names(&a.name, &b.name));
        }

        let slots = character
            .spell_slots
            .iter()
            .map(|(level, pair)| SlotSummary {
                level,
                current: pair.current,
                max: pair.max,
            })
            .collect();

        Self {
            spells_by_level,
            slots,
        }
    }

    pub fn spell_count(&self) -> usize {
        self.spells_by_level.values().map(Vec::len).sum()
    }
}
