//! Selection and expansion state for spell list views
//!
//! Both are plain values owned by the caller and passed into the pure list
//! transformations; nothing here is shared or mutated behind the caller's back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{SpellId, SpellLevel};

/// Spells currently checked for addition to a character's known list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionState {
    selected: BTreeSet<SpellId>,
}

impl SelectionState {
    pub fn from_ids(ids: impl IntoIterator<Item = SpellId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }

    /// Flip membership of a single spell
    pub fn toggle(&mut self, id: SpellId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Two-state toggle over the visible spells: select exactly `visible`
    /// unless every one of them is already selected, in which case clear.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a SpellId> + Clone) {
        if self.is_all_selected(visible.clone()) {
            self.clear();
        } else {
            self.selected = visible.into_iter().cloned().collect();
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &SpellId) -> bool {
        self.selected.contains(id)
    }

    /// True when every visible spell is selected (vacuously true for none)
    pub fn is_all_selected<'a>(&self, visible: impl IntoIterator<Item = &'a SpellId>) -> bool {
        visible.into_iter().all(|id| self.selected.contains(id))
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Spell levels currently shown expanded in a list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpandedLevels {
    levels: BTreeSet<SpellLevel>,
}

impl Default for ExpandedLevels {
    /// Every level starts expanded
    fn default() -> Self {
        Self::all()
    }
}

impl ExpandedLevels {
    pub fn all() -> Self {
        Self {
            levels: SpellLevel::all().collect(),
        }
    }

    pub fn toggle(&mut self, level: SpellLevel) {
        if !self.levels.remove(&level) {
            self.levels.insert(level);
        }
    }

    pub fn is_expanded(&self, level: SpellLevel) -> bool {
        self.levels.contains(&level)
    }
}

#[cfg(test)]
impl ExpandedLevels {
    pub fn none() -> Self {
        Self {
            levels: BTreeSet::new(),
        }
    }

    pub fn from_levels(levels: impl IntoIterator<Item = SpellLevel>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<SpellId> {
        names.iter().map(|n| SpellId::from(*n)).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut selection = SelectionState::default();
        selection.toggle("shield".into());
        assert!(selection.contains(&"shield".into()));
        selection.toggle("shield".into());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_is_two_state() {
        let visible = ids(&["fireball", "light", "shield"]);
        let mut selection = SelectionState::default();

        selection.select_all(&visible);
        assert_eq!(selection.len(), 3);
        assert!(selection.is_all_selected(&visible));

        selection.select_all(&visible);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_replaces_partial_selection() {
        let visible = ids(&["light", "shield"]);
        let mut selection = SelectionState::from_ids(ids(&["light", "wish"]));

        selection.select_all(&visible);

        // Exactly the visible set, not additive
        assert_eq!(selection, SelectionState::from_ids(visible.clone()));
        assert!(!selection.contains(&"wish".into()));
    }

    #[test]
    fn test_expanded_levels_default_to_all() {
        let mut expanded = ExpandedLevels::default();
        let third = SpellLevel::new(3).unwrap();
        assert!(SpellLevel::all().all(|l| expanded.is_expanded(l)));

        expanded.toggle(third);
        assert!(!expanded.is_expanded(third));
        expanded.toggle(third);
        assert!(expanded.is_expanded(third));
    }
}
