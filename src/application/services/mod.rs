//! Application services - Use case implementations
//!
//! The spell catalog service works purely on reference data; the character
//! service talks to the remote store through `CharacterStorePort`.

pub mod character_service;
pub mod spell_catalog_service;

pub use character_service::{CharacterService, CharacterServiceImpl};
pub use spell_catalog_service::{ReferenceData, SpellCatalogService};
