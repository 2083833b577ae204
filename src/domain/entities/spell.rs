//! Spell entity - Immutable reference data for a session

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{SpellId, SpellLevel};

/// A spell from the reference catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spell {
    pub id: SpellId,
    pub name: String,
    pub level: SpellLevel,
    pub school: SpellSchool,
    pub casting_time: String,
    pub range: String,
    /// Class names whose spell list includes this spell
    pub classes: Vec<String>,
    /// Subclass names that grant this spell outside their class list
    pub subclasses: Vec<String>,
}

impl Spell {
    pub fn new(
        id: impl Into<SpellId>,
        name: impl Into<String>,
        level: SpellLevel,
        school: SpellSchool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            level,
            school,
            casting_time: String::new(),
            range: String::new(),
            classes: Vec::new(),
            subclasses: Vec::new(),
        }
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.classes.push(class_name.into());
        self
    }

    pub fn with_subclass(mut self, subclass_name: impl Into<String>) -> Self {
        self.subclasses.push(subclass_name.into());
        self
    }

    pub fn with_casting_time(mut self, casting_time: impl Into<String>) -> Self {
        self.casting_time = casting_time.into();
        self
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }
}

/// The eight schools of magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

impl SpellSchool {
    pub const ALL: [SpellSchool; 8] = [
        Self::Abjuration,
        Self::Conjuration,
        Self::Divination,
        Self::Enchantment,
        Self::Evocation,
        Self::Illusion,
        Self::Necromancy,
        Self::Transmutation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Abjuration => "Abjuration",
            Self::Conjuration => "Conjuration",
            Self::Divination => "Divination",
            Self::Enchantment => "Enchantment",
            Self::Evocation => "Evocation",
            Self::Illusion => "Illusion",
            Self::Necromancy => "Necromancy",
            Self::Transmutation => "Transmutation",
        }
    }
}

impl std::fmt::Display for SpellSchool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SpellSchool {
    type Err = UnknownSpellSchool;

    /// Case-insensitive, surrounding whitespace ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|school| school.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSpellSchool(s.to_string()))
    }
}

impl TryFrom<String> for SpellSchool {
    type Error = UnknownSpellSchool;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpellSchool> for String {
    fn from(school: SpellSchool) -> String {
        school.name().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown school of magic: {0}")]
pub struct UnknownSpellSchool(pub String);
