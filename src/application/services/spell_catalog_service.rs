//! Spell Catalog Service - Browsing and selecting spells for a class
//!
//! Owns the static reference data for the lifetime of the process and runs
//! the catalog → filter/sort → grouping pipeline for list views.

use tracing::{debug, instrument};

use crate::application::dto::{
    SelectionAction, SpellViewEntryDto, SpellViewRequest, SpellViewResponse,
};
use crate::application::errors::AppError;
use crate::domain::entities::{names_match, DndClass, Spell, SpellSchool};
use crate::domain::services::{
    build_entries, compare_names, filter_and_sort, spells_for_class, SpellFilter,
};
use crate::domain::value_objects::SelectionState;

/// Spells and classes loaded once at start-up, read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub spells: Vec<Spell>,
    pub classes: Vec<DndClass>,
}

pub struct SpellCatalogService {
    data: ReferenceData,
}

impl SpellCatalogService {
    pub fn new(data: ReferenceData) -> Self {
        Self { data }
    }

    /// The full catalog, used to resolve known spells
    pub fn all_spells(&self) -> &[Spell] {
        &self.data.spells
    }

    /// Classes that can cast spells, sorted by name
    pub fn spellcasting_classes(&self) -> Vec<&DndClass> {
        let mut classes: Vec<&DndClass> = self
            .data
            .classes
            .iter()
            .filter(|class| class.spellcasting)
            .collect();
        classes.sort_by(|a, b| compare_names(&a.name, &b.name));
        classes
    }

    pub fn find_class(&self, name: &str) -> Option<&DndClass> {
        self.data
            .classes
            .iter()
            .find(|class| names_match(&class.name, name))
    }

    /// Spells available to the named class; unknown classes yield nothing
    #[instrument(skip(self))]
    pub fn spells_for_class(&self, class_name: &str) -> Vec<Spell> {
        let class = self.find_class(class_name);
        if class.is_none() {
            debug!(class_name, "Class not in reference data");
        }
        spells_for_class(&self.data.spells, class)
    }

    /// Filtered and sorted catalog for the named class
    pub fn search(
        &self,
        class_name: &str,
        query: &str,
        school: Option<&str>,
    ) -> Result<Vec<Spell>, AppError> {
        let filter = Self::build_filter(query, school)?;
        Ok(filter_and_sort(&self.spells_for_class(class_name), &filter))
    }

    /// Render the selection list for the named class
    ///
    /// The level toggle and selection action are applied before rendering;
    /// select-all operates on the filtered spells only.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub fn spell_view(
        &self,
        class_name: &str,
        request: SpellViewRequest,
    ) -> Result<SpellViewResponse, AppError> {
        let filter = Self::build_filter(&request.query, request.school.as_deref())?;
        let visible = filter_and_sort(&self.spells_for_class(class_name), &filter);

        let mut expanded_levels = request.expanded_levels;
        if let Some(level) = request.toggle_level {
            expanded_levels.toggle(level);
        }

        let mut selected = request.selected;
        match request.action {
            Some(SelectionAction::Toggle { spell_id }) => selected.toggle(spell_id),
            Some(SelectionAction::SelectAll) => selected.select_all(visible.iter().map(|s| &s.id)),
            Some(SelectionAction::Clear) => selected.clear(),
            None => {}
        }

        let entries = build_entries(&visible, &expanded_levels)
            .iter()
            .map(|entry| SpellViewEntryDto::from_entry(entry, &selected))
            .collect();

        Ok(SpellViewResponse {
            entries,
            match_count: visible.len(),
            all_selected: !visible.is_empty()
                && selected.is_all_selected(visible.iter().map(|s| &s.id)),
            selected,
            expanded_levels,
        })
    }

    /// Catalog spells for the selected ids; ids not in the catalog are skipped
    pub fn resolve_selection(&self, selection: &SelectionState) -> Vec<&Spell> {
        self.data
            .spells
            .iter()
            .filter(|spell| selection.contains(&spell.id))
            .collect()
    }

    fn build_filter(query: &str, school: Option<&str>) -> Result<SpellFilter, AppError> {
        let mut filter = SpellFilter::new(query);
        if let Some(school) = school.map(str::trim).filter(|s| !s.is_empty()) {
            let school = school
                .parse::<SpellSchool>()
                .map_err(|e| AppError::Validation(e.to_string()))?;
            filter = filter.with_school(school);
        }
        Ok(filter)
    }
}
