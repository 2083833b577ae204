//! Adding and removing entries in a character's known-spell list

use crate::domain::entities::{KnownSpell, Spell};

/// Result of merging new spells into a known list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownSpellMerge {
    /// The full list to persist
    pub known: Vec<KnownSpell>,
    /// Entries that were not already known
    pub added: Vec<KnownSpell>,
}

impl KnownSpellMerge {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
    }
}

/// Append `additions` to `existing`, skipping names already present in
/// either list.
pub fn merge_known_spells<'a>(
    existing: &[KnownSpell],
    additions: impl IntoIterator<Item = &'a Spell>,
) -> KnownSpellMerge {
    let mut known = existing.to_vec();
    let mut added = Vec::new();

    for spell in additions {
        if known.iter().any(|k| k.matches(&spell.name)) {
            continue;
        }
        let entry = KnownSpell::with_level(spell.name.clone(), spell.level);
        known.push(entry.clone());
        added.push(entry);
    }

    KnownSpellMerge { known, added }
}

/// `existing` without `name`, or `None` if it was not known
pub fn remove_known_spell(existing: &[KnownSpell], name: &str) -> Option<Vec<KnownSpell>> {
    let remaining: Vec<KnownSpell> = existing
        .iter()
        .filter(|known| !known.matches(name))
        .cloned()
        .collect();
    (remaining.len() != existing.len()).then_some(remaining)
}
