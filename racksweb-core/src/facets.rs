//! Listes d'options du panneau de filtres.

use crate::catalog::{EquipmentCategory, EquipmentRecord};
use crate::filter::contains_ignore_case;
use std::collections::HashSet;

/// Valeurs sélectionnables, distinctes, dans l'ordre de première apparition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    pub racks: Vec<String>,
    pub equipment_types: Vec<String>,
    pub categories: Vec<EquipmentCategory>,
    pub tags: Vec<String>,
}

impl FacetOptions {
    pub fn from_records(records: &[EquipmentRecord]) -> Self {
        let mut options = Self::default();
        let mut seen_racks = HashSet::new();
        let mut seen_types = HashSet::new();
        let mut seen_tags = HashSet::new();

        for record in records {
            if seen_racks.insert(record.rack.as_str()) {
                options.racks.push(record.rack.clone());
            }
            if seen_types.insert(record.type_id()) {
                options.equipment_types.push(record.type_id().to_string());
            }
            if !options.categories.contains(&record.category) {
                options.categories.push(record.category);
            }
            for tag in &record.tags {
                if seen_tags.insert(tag.as_str()) {
                    options.tags.push(tag.clone());
                }
            }
        }
        options
    }

    /// Restreint chaque liste par son texte de recherche
    pub fn narrowed(&self, search: &FacetSearch) -> Self {
        Self {
            racks: matching(&self.racks, &search.racks),
            equipment_types: matching(&self.equipment_types, &search.equipment_types),
            categories: self
                .categories
                .iter()
                .copied()
                .filter(|c| contains_ignore_case(c.key(), &search.categories))
                .collect(),
            tags: matching(&self.tags, &search.tags),
        }
    }
}

fn matching(options: &[String], query: &str) -> Vec<String> {
    options
        .iter()
        .filter(|option| contains_ignore_case(option, query))
        .cloned()
        .collect()
}

/// Texte saisi dans les champs de recherche du panneau
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSearch {
    pub racks: String,
    pub equipment_types: String,
    pub categories: String,
    pub tags: String,
}

/// Panneau latéral des filtres (fermé par défaut)
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    open: bool,
    pub search: FacetSearch,
}

impl FilterPanel {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EquipmentType;

    fn record(name: &str, rack: &str, category: EquipmentCategory, type_id: &str, tags: &[&str]) -> EquipmentRecord {
        EquipmentRecord {
            category,
            name: name.into(),
            rack: rack.into(),
            equipment_type: EquipmentType {
                id: type_id.into(),
                ..Default::default()
            },
            position: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn records() -> Vec<EquipmentRecord> {
        vec![
            record("cn1", "R02", EquipmentCategory::Node, "server", &["prod", "test"]),
            record("cn2", "R01", EquipmentCategory::Node, "server", &["prod"]),
            record("sw1", "R10", EquipmentCategory::Network, "switch", &[]),
            record("st1", "R01", EquipmentCategory::Storage, "storage", &["test"]),
        ]
    }

    #[test]
    fn test_options_are_distinct_in_first_appearance_order() {
        let options = FacetOptions::from_records(&records());
        assert_eq!(options.racks, vec!["R02", "R01", "R10"]);
        assert_eq!(options.equipment_types, vec!["server", "switch", "storage"]);
        assert_eq!(
            options.categories,
            vec![EquipmentCategory::Node, EquipmentCategory::Network, EquipmentCategory::Storage]
        );
        assert_eq!(options.tags, vec!["prod", "test"]);
    }

    #[test]
    fn test_narrowed_by_search_text() {
        let options = FacetOptions::from_records(&records());
        let search = FacetSearch {
            racks: "R0".into(),
            equipment_types: "SER".into(),
            categories: "stor".into(),
            tags: String::new(),
        };

        let narrowed = options.narrowed(&search);
        assert_eq!(narrowed.racks, vec!["R02", "R01"]);
        assert_eq!(narrowed.equipment_types, vec!["server"]);
        assert_eq!(narrowed.categories, vec![EquipmentCategory::Storage]);
        assert_eq!(narrowed.tags, options.tags);
    }

    #[test]
    fn test_empty_catalog_has_no_options() {
        assert_eq!(FacetOptions::from_records(&[]), FacetOptions::default());
    }

    #[test]
    fn test_filter_panel_toggle() {
        let mut panel = FilterPanel::default();
        assert!(!panel.is_open());
        assert!(panel.toggle());
        assert!(!panel.toggle());
    }
}
