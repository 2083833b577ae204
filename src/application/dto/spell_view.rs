//! Spell-selection view model
//!
//! The client sends its current view state (search text, school toggle,
//! expanded levels, checked spells) and optionally one action; the response
//! is the rendered list plus the updated state to send back next time.

use serde::{Deserialize, Serialize};

use crate::domain::entities::Spell;
use crate::domain::services::SpellListEntry;
use crate::domain::value_objects::{ExpandedLevels, SelectionState, SpellId, SpellLevel};

/// A single change to the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionAction {
    Toggle { spell_id: SpellId },
    SelectAll,
    Clear,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpellViewRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub expanded_levels: ExpandedLevels,
    #[serde(default)]
    pub selected: SelectionState,
    #[serde(default)]
    pub action: Option<SelectionAction>,
    /// Expand or collapse one level before rendering
    #[serde(default)]
    pub toggle_level: Option<SpellLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellRowDto {
    pub id: SpellId,
    pub name: String,
    pub level: SpellLevel,
    pub school: String,
    pub casting_time: String,
    pub range: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpellViewEntryDto {
    Header {
        level: SpellLevel,
        label: String,
        spell_count: usize,
        expanded: bool,
    },
    Spell(SpellRowDto),
}

impl SpellViewEntryDto {
    pub fn from_entry(entry: &SpellListEntry<'_>, selection: &SelectionState) -> Self {
        match entry {
            SpellListEntry::Header {
                level,
                spell_count,
                expanded,
            } => Self::Header {
                level: *level,
                label: level.label(),
                spell_count: *spell_count,
                expanded: *expanded,
            },
            SpellListEntry::Spell(spell) => Self::Spell(SpellRowDto::from_spell(spell, selection)),
        }
    }
}

impl SpellRowDto {
    pub fn from_spell(spell: &Spell, selection: &SelectionState) -> Self {
        Self {
            id: spell.id.clone(),
            name: spell.name.clone(),
            level: spell.level,
            school: spell.school.to_string(),
            casting_time: spell.casting_time.clone(),
            range: spell.range.clone(),
            selected: selection.contains(&spell.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpellViewResponse {
    pub entries: Vec<SpellViewEntryDto>,
    /// Number of spells matching the filter, collapsed or not
    pub match_count: usize,
    pub selected: SelectionState,
    pub expanded_levels: ExpandedLevels,
    pub all_selected: bool,
}
