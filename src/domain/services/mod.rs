//! Domain services - Pure transformations over spells and characters
//!
//! Every function here takes its state as explicit values and returns new
//! values, so each step of the list pipeline can be tested on its own.

pub mod catalog;
pub mod grimoire;
pub mod known_spells;
pub mod slots;
pub mod spell_filter;
pub mod spell_list;

pub use catalog::spells_for_class;
pub use grimoire::{Grimoire, SlotSummary};
pub use known_spells::{merge_known_spells, remove_known_spell};
pub use slots::{adjust_hit_points, adjust_slots};
pub use spell_filter::{compare_names, filter_and_sort, SpellFilter};
pub use spell_list::{build_entries, SpellListEntry};
