//! Domain layer - Core spell and character logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Spell, DndClass, Character
//! - Value Objects: identifiers, spell levels, selection and expansion state
//! - Domain Services: pure transformations (catalog matching, filtering,
//!   grouping, grimoire aggregation, slot arithmetic)

pub mod entities;
pub mod services;
pub mod value_objects;
