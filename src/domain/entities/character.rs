//! Character entity - A player character sheet held by the remote store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, SpellLevel};

/// A character sheet (transient cached copy of the store's record)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class_name: String,
    pub level: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub spell_slots: SpellSlots,
    pub known_spells: Vec<KnownSpell>,
    /// Active share token, if the sheet is currently shared
    pub share_token: Option<String>,
}

#[cfg(test)]
impl Character {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            class_name: class_name.into(),
            level: 1,
            current_hp: 0,
            max_hp: 0,
            spell_slots: SpellSlots::default(),
            known_spells: Vec::new(),
            share_token: None,
        }
    }

    pub fn with_hp(mut self, current: u32, max: u32) -> Self {
        self.current_hp = current;
        self.max_hp = max;
        self
    }

    pub fn with_slots(mut self, level: SpellLevel, current: u32, max: u32) -> Self {
        self.spell_slots.set(level, SlotPair::new(current, max));
        self
    }

    pub fn with_known_spell(mut self, spell: KnownSpell) -> Self {
        self.known_spells.push(spell);
        self
    }
}

/// Current and maximum slots for one spell level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPair {
    pub current: u32,
    pub max: u32,
}

impl SlotPair {
    /// Current is clamped to max
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }
}

/// Spell slots keyed by level, iterated in ascending level order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpellSlots(BTreeMap<SpellLevel, SlotPair>);

impl SpellSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, level: SpellLevel) -> Option<SlotPair> {
        self.0.get(&level).copied()
    }

    pub fn set(&mut self, level: SpellLevel, pair: SlotPair) {
        self.0.insert(level, pair);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpellLevel, SlotPair)> + '_ {
        self.0.iter().map(|(level, pair)| (*level, *pair))
    }
}

#[cfg(test)]
impl SpellSlots {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SpellLevel, SlotPair)> for SpellSlots {
    fn from_iter<I: IntoIterator<Item = (SpellLevel, SlotPair)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A spell the character knows, in canonical form
///
/// Stored records may hold a bare name or a `{name, level}` object; both
/// normalize to this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownSpell {
    pub name: String,
    pub level: Option<SpellLevel>,
}

impl KnownSpell {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: None,
        }
    }

    pub fn with_level(name: impl Into<String>, level: SpellLevel) -> Self {
        Self {
            name: name.into(),
            level: Some(level),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

/// Spell names compare trimmed and case-insensitively
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
