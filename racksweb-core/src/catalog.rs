/**
 * CATALOGUE D'ÉQUIPEMENTS - Vue à plat du layout d'une infrastructure
 *
 * RÔLE :
 * Transforme la hiérarchie rack → {nodes, network, storage, misc} renvoyée par
 * RacksDB en une séquence unique d'EquipmentRecord, support des filtres.
 *
 * FONCTIONNEMENT :
 * - Ordre rack-major (ordre du layout), puis catégorie (nodes, network,
 *   storage, misc), puis ordre de la liste source
 * - Aucun record ajouté ni perdu, aucune validation des types d'équipement
 * - Le cache est lié à l'Arc<Infrastructure> : un nouvel Arc invalide le cache
 */

use crate::models::{Equipment, EquipmentType, Infrastructure, Position, RackLayout};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentCategory {
    #[serde(rename = "nodes")]
    Node,
    Network,
    Storage,
    Misc,
}

impl EquipmentCategory {
    pub const ALL: [EquipmentCategory; 4] = [
        EquipmentCategory::Node,
        EquipmentCategory::Network,
        EquipmentCategory::Storage,
        EquipmentCategory::Misc,
    ];

    /// Clé de la liste correspondante dans le layout
    pub fn key(self) -> &'static str {
        match self {
            EquipmentCategory::Node => "nodes",
            EquipmentCategory::Network => "network",
            EquipmentCategory::Storage => "storage",
            EquipmentCategory::Misc => "misc",
        }
    }

    fn equipment(self, layout: &RackLayout) -> &[Equipment] {
        match self {
            EquipmentCategory::Node => &layout.nodes,
            EquipmentCategory::Network => &layout.network,
            EquipmentCategory::Storage => &layout.storage,
            EquipmentCategory::Misc => &layout.misc,
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown equipment category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for EquipmentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nodes" | "node" => Ok(EquipmentCategory::Node),
            "network" => Ok(EquipmentCategory::Network),
            "storage" => Ok(EquipmentCategory::Storage),
            "misc" => Ok(EquipmentCategory::Misc),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Équipement à plat, rattaché à son rack et à sa catégorie
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentRecord {
    pub category: EquipmentCategory,
    pub name: String,
    pub rack: String,
    pub equipment_type: EquipmentType,
    pub position: Option<Position>,
    pub tags: Vec<String>,
}

impl EquipmentRecord {
    fn from_equipment(category: EquipmentCategory, rack: &str, equipment: &Equipment) -> Self {
        Self {
            category,
            name: equipment.name.clone(),
            rack: rack.to_string(),
            equipment_type: equipment.equipment_type.clone(),
            position: equipment.position,
            tags: equipment.tags.clone(),
        }
    }

    pub fn type_id(&self) -> &str {
        &self.equipment_type.id
    }
}

/// Aplatit le layout d'une infrastructure
pub fn flatten(infrastructure: &Infrastructure) -> Vec<EquipmentRecord> {
    infrastructure
        .layout
        .iter()
        .flat_map(|layout| {
            EquipmentCategory::ALL.into_iter().flat_map(move |category| {
                category
                    .equipment(layout)
                    .iter()
                    .map(move |equipment| EquipmentRecord::from_equipment(category, &layout.rack, equipment))
            })
        })
        .collect()
}

/// Catalogue mis en cache pour une infrastructure chargée
#[derive(Debug, Clone)]
pub struct EquipmentCatalog {
    source: Arc<Infrastructure>,
    records: Vec<EquipmentRecord>,
}

impl EquipmentCatalog {
    pub fn new(source: Arc<Infrastructure>) -> Self {
        let records = flatten(&source);
        debug!(infrastructure = %source.name, records = records.len(), "equipment catalog built");
        Self { source, records }
    }

    /// Reconstruit le catalogue si `source` est une autre infrastructure.
    /// Returns true when the records were rebuilt.
    pub fn refresh(&mut self, source: &Arc<Infrastructure>) -> bool {
        if Arc::ptr_eq(&self.source, source) {
            return false;
        }
        *self = Self::new(Arc::clone(source));
        true
    }

    pub fn infrastructure(&self) -> &Arc<Infrastructure> {
        &self.source
    }

    pub fn records(&self) -> &[EquipmentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn infrastructure() -> Infrastructure {
        serde_json::from_value(json!({
            "name": "mercury",
            "layout": [
                {
                    "rack": "R02",
                    "misc": [{"name": "pdu-r02", "type": {"id": "apc-pdu"}}],
                    "nodes": [
                        {"name": "cn003", "type": {"id": "sm220bt"}, "tags": ["compute"]},
                        {"name": "cn004", "type": {"id": "sm220bt"}, "tags": ["compute"]}
                    ]
                },
                {
                    "rack": "R01",
                    "storage": [{"name": "nas1", "type": {"id": "netapp"}}],
                    "network": [{"name": "sw1", "type": {"id": "cisco-x"}, "tags": ["infra"]}],
                    "nodes": [{"name": "cn001", "type": {"id": "dell-r740"}, "position": {"height": 3, "width": 0.5}}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_flatten_is_rack_major_then_category() {
        let records = flatten(&infrastructure());
        let order: Vec<(&str, &str, EquipmentCategory)> = records
            .iter()
            .map(|r| (r.rack.as_str(), r.name.as_str(), r.category))
            .collect();

        assert_eq!(
            order,
            vec![
                ("R02", "cn003", EquipmentCategory::Node),
                ("R02", "cn004", EquipmentCategory::Node),
                ("R02", "pdu-r02", EquipmentCategory::Misc),
                ("R01", "cn001", EquipmentCategory::Node),
                ("R01", "sw1", EquipmentCategory::Network),
                ("R01", "nas1", EquipmentCategory::Storage),
            ]
        );
    }

    #[test]
    fn test_flatten_keeps_record_fields() {
        let records = flatten(&infrastructure());
        let cn001 = records.iter().find(|r| r.name == "cn001").unwrap();
        assert_eq!(cn001.type_id(), "dell-r740");
        assert_eq!(cn001.position.map(|p| p.width), Some(0.5));
        assert!(cn001.tags.is_empty());
        assert!(cn001.equipment_type.cpu.is_none());
    }

    #[test]
    fn test_flatten_empty_layout() {
        let infra = Infrastructure {
            name: "empty".into(),
            description: None,
            tags: vec![],
            layout: vec![],
        };
        assert!(flatten(&infra).is_empty());
    }

    #[test]
    fn test_catalog_refresh_follows_reference() {
        let first = Arc::new(infrastructure());
        let mut catalog = EquipmentCatalog::new(Arc::clone(&first));
        assert_eq!(catalog.len(), 6);

        assert!(!catalog.refresh(&first));

        let mut smaller = infrastructure();
        smaller.layout.truncate(1);
        let second = Arc::new(smaller);
        assert!(catalog.refresh(&second));
        assert_eq!(catalog.len(), 3);
        assert!(Arc::ptr_eq(catalog.infrastructure(), &second));
    }

    #[test]
    fn test_category_parsing_and_display() {
        assert_eq!("nodes".parse::<EquipmentCategory>(), Ok(EquipmentCategory::Node));
        assert_eq!("Node".parse::<EquipmentCategory>(), Ok(EquipmentCategory::Node));
        assert_eq!(" misc ".parse::<EquipmentCategory>(), Ok(EquipmentCategory::Misc));
        assert!("switches".parse::<EquipmentCategory>().is_err());
        assert_eq!(EquipmentCategory::Node.to_string(), "nodes");
        assert_eq!(EquipmentCategory::Storage.to_string(), "storage");
    }
}
