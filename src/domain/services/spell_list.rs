//! Level-grouped display sequence for spell lists

use crate::domain::entities::Spell;
use crate::domain::value_objects::{ExpandedLevels, SpellLevel};

/// One row of a grouped spell list
#[derive(Debug, Clone, PartialEq)]
pub enum SpellListEntry<'a> {
    /// Emitted once per level present in the input, expanded or not
    Header {
        level: SpellLevel,
        spell_count: usize,
        expanded: bool,
    },
    Spell(&'a Spell),
}

/// Interleave level headers with spell rows
///
/// Expects `spells` already sorted by level. A header is emitted whenever the
/// level changes; spell rows only appear for expanded levels.
pub fn build_entries<'a>(spells: &'a [Spell], expanded: &ExpandedLevels) -> Vec<SpellListEntry<'a>> {
    let mut entries = Vec::with_capacity(spells.len() + SpellLevel::MAX as usize + 1);
    let mut current_level: Option<SpellLevel> = None;

    for (index, spell) in spells.iter().enumerate() {
        if current_level != Some(spell.level) {
            current_level = Some(spell.level);
            let spell_count = spells[index..]
                .iter()
                .take_while(|s| s.level == spell.level)
                .count();
            entries.push(SpellListEntry::Header {
                level: spell.level,
                spell_count,
                expanded: expanded.is_expanded(spell.level),
            });
        }
        if expanded.is_expanded(spell.level) {
            entries.push(SpellListEntry::Spell(spell));
        }
    }

    entries
}
