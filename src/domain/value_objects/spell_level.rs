//! Spell level - 0 (cantrip) through 9

use serde::{Deserialize, Serialize};

/// A validated spell level in `[0, 9]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SpellLevel(u8);

impl SpellLevel {
    pub const CANTRIP: SpellLevel = SpellLevel(0);
    pub const MAX: u8 = 9;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    /// Every level from cantrips to 9th, ascending
    pub fn all() -> impl Iterator<Item = SpellLevel> {
        (0..=Self::MAX).map(SpellLevel)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_cantrip(self) -> bool {
        self == Self::CANTRIP
    }

    /// Header label used by list views ("Cantrips", "Level 3")
    pub fn label(self) -> String {
        if self.is_cantrip() {
            "Cantrips".to_string()
        } else {
            format!("Level {}", self.0)
        }
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = InvalidSpellLevel;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or(InvalidSpellLevel(level))
    }
}

impl From<SpellLevel> for u8 {
    fn from(level: SpellLevel) -> u8 {
        level.0
    }
}

impl std::fmt::Display for SpellLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("spell level {0} is outside 0-9")]
pub struct InvalidSpellLevel(pub u8);
