//! Data transfer objects shared by the services and the HTTP layer

mod spell_view;

pub use spell_view::{
    SelectionAction, SpellViewEntryDto, SpellViewRequest, SpellViewResponse,
};
