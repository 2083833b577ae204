//! Character class reference data

use serde::Serialize;

/// A playable class with its subclasses
///
/// Subclass entries arrive either as bare names or as named objects; they are
/// normalized to plain names when the reference data is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DndClass {
    pub name: String,
    pub subclasses: Vec<String>,
    pub spellcasting: bool,
}

impl DndClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subclasses: Vec::new(),
            spellcasting: false,
        }
    }

    pub fn with_subclass(mut self, subclass: impl Into<String>) -> Self {
        self.subclasses.push(subclass.into());
        self
    }

    pub fn with_spellcasting(mut self, spellcasting: bool) -> Self {
        self.spellcasting = spellcasting;
        self
    }
}
