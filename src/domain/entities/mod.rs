//! Domain entities - Reference data and character sheets

mod character;
mod dnd_class;
mod spell;

pub use character::{names_match, Character, KnownSpell, SlotPair, SpellSlots};
pub use dnd_class::DndClass;
pub use spell::{Spell, SpellSchool, UnknownSpellSchool};
