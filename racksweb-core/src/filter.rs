//! Évaluation des critères sur le catalogue d'équipements.
//!
//! Every non-empty dimension must match (AND); inside the tags dimension one
//! shared tag is enough (OR). A full re-scan on every change is fine: a
//! catalog holds at most a few hundred records.

use crate::catalog::EquipmentRecord;
use crate::criteria::FilterCriteria;

impl FilterCriteria {
    pub fn matches(&self, record: &EquipmentRecord) -> bool {
        if !self.racks.is_empty() && !self.racks.contains(&record.rack) {
            return false;
        }
        if !self.equipment_types.is_empty() && !self.equipment_types.contains(record.type_id()) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }
        if !self.tags.is_empty() && !record.tags.iter().any(|tag| self.tags.contains(tag)) {
            return false;
        }
        if !self.name_query.is_empty() && !contains_ignore_case(&record.name, &self.name_query) {
            return false;
        }
        true
    }
}

/// Sous-séquence des records qui satisfont les critères, ordre d'origine conservé
pub fn evaluate<'a>(records: &'a [EquipmentRecord], criteria: &FilterCriteria) -> Vec<&'a EquipmentRecord> {
    records.iter().filter(|record| criteria.matches(record)).collect()
}

/// Recherche textuelle insensible à la casse
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
