//! Value objects - Immutable objects defined by their attributes

mod ids;
mod selection;
mod session;
mod slot_field;
mod spell_level;

pub use ids::*;
pub use selection::{ExpandedLevels, SelectionState};
pub use session::{Session, ShareToken};
pub use slot_field::SlotField;
pub use spell_level::{InvalidSpellLevel, SpellLevel};
