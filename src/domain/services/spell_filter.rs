//! Free-text and school filtering, ordered by level then name

use std::cmp::Ordering;

use crate::domain::entities::{Spell, SpellSchool};

/// Search box text plus the optional school toggle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellFilter {
    pub query: String,
    pub school: Option<SpellSchool>,
}

impl SpellFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            school: None,
        }
    }

    pub fn with_school(mut self, school: SpellSchool) -> Self {
        self.school = Some(school);
        self
    }

    pub fn matches(&self, spell: &Spell) -> bool {
        let query = self.query.to_lowercase();
        let name_matches = query.is_empty() || spell.name.to_lowercase().contains(&query);
        let school_matches = self.school.map_or(true, |school| spell.school == school);
        name_matches && school_matches
    }
}

/// Name ordering for lists: case-folded first, then the raw text as a
/// tie-break so the order is total and stable.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Apply the filter and sort ascending by level, then by name
pub fn filter_and_sort(spells: &[Spell], filter: &SpellFilter) -> Vec<Spell> {
    let mut matched: Vec<Spell> = spells
        .iter()
        .filter(|spell| filter.matches(spell))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        a.level
            .cmp(&b.level)
            .then_with(|| compare_names(&a.name, &b.name))
    });
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SpellLevel;

    fn spell(name: &str, level: u8, school: SpellSchool) -> Spell {
        Spell::new(
            name.to_lowercase().replace(' ', "-").as_str(),
            name,
            SpellLevel::new(level).unwrap(),
            school,
        )
    }

    fn catalog() -> Vec<Spell> {
        vec![
            spell("Fireball", 3, SpellSchool::Evocation),
            spell("Light", 0, SpellSchool::Evocation),
            spell("Shield", 1, SpellSchool::Abjuration),
            spell("mage hand", 0, SpellSchool::Conjuration),
            spell("Alarm", 1, SpellSchool::Abjuration),
        ]
    }

    #[test]
    fn test_query_li_matches_only_light() {
        let catalog = vec![
            spell("Fireball", 3, SpellSchool::Evocation),
            spell("Light", 0, SpellSchool::Evocation),
            spell("Shield", 1, SpellSchool::Abjuration),
        ];
        let result = filter_and_sort(&catalog, &SpellFilter::new("li"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Light");
        assert_eq!(result[0].level.value(), 0);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let query = "IE";
        let result = filter_and_sort(&catalog(), &SpellFilter::new(query));
        assert!(!result.is_empty());
        for spell in &result {
            assert!(spell.name.to_lowercase().contains(&query.to_lowercase()));
        }
    }

    #[test]
    fn test_school_filter() {
        let filter = SpellFilter::default().with_school(SpellSchool::Abjuration);
        let result = filter_and_sort(&catalog(), &filter);
        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alarm", "Shield"]);
    }

    #[test]
    fn test_empty_filter_sorts_by_level_then_name() {
        let result = filter_and_sort(&catalog(), &SpellFilter::default());
        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Light", "mage hand", "Alarm", "Shield", "Fireball"]);

        for pair in result.windows(2) {
            assert!(pair[0].level <= pair[1].level);
            if pair[0].level == pair[1].level {
                assert_ne!(compare_names(&pair[0].name, &pair[1].name), Ordering::Greater);
            }
        }
    }
}
