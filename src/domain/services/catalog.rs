//! Spell catalog matching - which spells a class can learn

use tracing::debug;

use crate::domain::entities::{DndClass, Spell};

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Spells on the class's list, plus spells granted by any of its subclasses
///
/// A missing class, or one with a blank name, yields an empty list.
pub fn spells_for_class(catalog: &[Spell], class: Option<&DndClass>) -> Vec<Spell> {
    let Some(class) = class else {
        debug!("No class given, catalog is empty");
        return Vec::new();
    };

    let class_name = normalize(&class.name);
    if class_name.is_empty() {
        debug!("Class has no name, catalog is empty");
        return Vec::new();
    }

    let subclasses: Vec<String> = class.subclasses.iter().map(|s| normalize(s)).collect();

    catalog
        .iter()
        .filter(|spell| {
            spell.classes.iter().any(|c| normalize(c) == class_name)
                || spell
                    .subclasses
                    .iter()
                    .any(|s| subclasses.contains(&normalize(s)))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SpellSchool;
    use crate::domain::value_objects::SpellLevel;

    fn catalog() -> Vec<Spell> {
        vec![
            Spell::new("fireball", "Fireball", SpellLevel::new(3).unwrap(), SpellSchool::Evocation)
                .with_class("Wizard")
                .with_class("Sorcerer"),
            Spell::new("cure-wounds", "Cure Wounds", SpellLevel::new(1).unwrap(), SpellSchool::Evocation)
                .with_class("Cleric")
                .with_subclass("Divine Soul"),
            Spell::new("hex", "Hex", SpellLevel::new(1).unwrap(), SpellSchool::Enchantment)
                .with_class("Warlock"),
        ]
    }

    fn names(spells: &[Spell]) -> Vec<&str> {
        spells.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_matches_class_name_case_insensitively() {
        let class = DndClass::new("  wizard ");
        let spells = spells_for_class(&catalog(), Some(&class));
        assert_eq!(names(&spells), vec!["Fireball"]);
    }

    #[test]
    fn test_matches_through_subclass() {
        let class = DndClass::new("Sorcerer").with_subclass("divine soul");
        let spells = spells_for_class(&catalog(), Some(&class));
        assert_eq!(names(&spells), vec!["Fireball", "Cure Wounds"]);
    }

    #[test]
    fn test_missing_class_yields_empty() {
        assert!(spells_for_class(&catalog(), None).is_empty());
        assert!(spells_for_class(&catalog(), Some(&DndClass::new(" "))).is_empty());
    }

    #[test]
    fn test_every_result_is_eligible() {
        let catalog = catalog();
        for class in [
            DndClass::new("Wizard"),
            DndClass::new("Cleric"),
            DndClass::new("Warlock").with_subclass("Divine Soul"),
            DndClass::new("Bard"),
        ] {
            for spell in spells_for_class(&catalog, Some(&class)) {
                let by_class = spell
                    .classes
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(&class.name));
                let by_subclass = spell.subclasses.iter().any(|s| {
                    class.subclasses.iter().any(|own| own.eq_ignore_ascii_case(s))
                });
                assert!(by_class || by_subclass, "{} is not eligible for {}", spell.name, class.name);
            }
        }
    }
}
