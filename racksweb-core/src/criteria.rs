/**
 * CRITÈRES DE FILTRE - Sélection active de la vue infrastructure
 *
 * RÔLE :
 * Cinq dimensions indépendantes : racks, types d'équipement, catégories,
 * tags (ensembles) et texte de recherche sur le nom.
 *
 * FONCTIONNEMENT :
 * - Dimension vide = aucune restriction
 * - add/remove idempotents (ajout d'une valeur présente ou retrait d'une
 *   valeur absente = no-op, signalé par le booléen de retour)
 * - Badges actifs pour la barre de filtres, retrait badge par badge
 */

use crate::catalog::EquipmentCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Racks,
    EquipmentTypes,
    Categories,
    Tags,
    EquipmentName,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Racks => "rack",
            Dimension::EquipmentTypes => "type",
            Dimension::Categories => "category",
            Dimension::Tags => "tag",
            Dimension::EquipmentName => "name",
        };
        f.write_str(label)
    }
}

/// Une valeur d'une dimension multi-sélection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    Rack(String),
    EquipmentType(String),
    Category(EquipmentCategory),
    Tag(String),
}

impl Selection {
    pub fn dimension(&self) -> Dimension {
        match self {
            Selection::Rack(_) => Dimension::Racks,
            Selection::EquipmentType(_) => Dimension::EquipmentTypes,
            Selection::Category(_) => Dimension::Categories,
            Selection::Tag(_) => Dimension::Tags,
        }
    }
}

/// Badge affiché dans la barre des filtres actifs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub dimension: Dimension,
    pub value: String,
}

impl fmt::Display for ActiveFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.dimension, self.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub racks: BTreeSet<String>,
    pub equipment_types: BTreeSet<String>,
    pub categories: BTreeSet<EquipmentCategory>,
    pub tags: BTreeSet<String>,
    pub name_query: String,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the value was already selected.
    pub fn add(&mut self, selection: Selection) -> bool {
        match selection {
            Selection::Rack(rack) => self.racks.insert(rack),
            Selection::EquipmentType(id) => self.equipment_types.insert(id),
            Selection::Category(category) => self.categories.insert(category),
            Selection::Tag(tag) => self.tags.insert(tag),
        }
    }

    /// Returns false when the value was not selected.
    pub fn remove(&mut self, selection: &Selection) -> bool {
        match selection {
            Selection::Rack(rack) => self.racks.remove(rack),
            Selection::EquipmentType(id) => self.equipment_types.remove(id),
            Selection::Category(category) => self.categories.remove(category),
            Selection::Tag(tag) => self.tags.remove(tag),
        }
    }

    /// Case à cocher : ajoute si absent, retire si présent. Returns the new membership.
    pub fn toggle(&mut self, selection: Selection) -> bool {
        if self.contains(&selection) {
            self.remove(&selection);
            false
        } else {
            self.add(selection);
            true
        }
    }

    pub fn contains(&self, selection: &Selection) -> bool {
        match selection {
            Selection::Rack(rack) => self.racks.contains(rack),
            Selection::EquipmentType(id) => self.equipment_types.contains(id),
            Selection::Category(category) => self.categories.contains(category),
            Selection::Tag(tag) => self.tags.contains(tag),
        }
    }

    pub fn set_name_query(&mut self, query: impl Into<String>) {
        self.name_query = query.into();
    }

    pub fn clear(&mut self, dimension: Dimension) {
        match dimension {
            Dimension::Racks => self.racks.clear(),
            Dimension::EquipmentTypes => self.equipment_types.clear(),
            Dimension::Categories => self.categories.clear(),
            Dimension::Tags => self.tags.clear(),
            Dimension::EquipmentName => self.name_query.clear(),
        }
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.racks.is_empty()
            && self.equipment_types.is_empty()
            && self.categories.is_empty()
            && self.tags.is_empty()
            && self.name_query.is_empty()
    }

    /// Un badge par valeur sélectionnée, dans l'ordre racks, types, catégories, tags, nom
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let badge = |dimension: Dimension, value: &str| ActiveFilter {
            dimension,
            value: value.to_string(),
        };

        let mut active: Vec<ActiveFilter> = Vec::new();
        active.extend(self.racks.iter().map(|v| badge(Dimension::Racks, v)));
        active.extend(self.equipment_types.iter().map(|v| badge(Dimension::EquipmentTypes, v)));
        active.extend(self.categories.iter().map(|c| badge(Dimension::Categories, c.key())));
        active.extend(self.tags.iter().map(|v| badge(Dimension::Tags, v)));
        if !self.name_query.is_empty() {
            active.push(badge(Dimension::EquipmentName, &self.name_query));
        }
        active
    }

    /// Retire la valeur désignée par un badge (bouton X de la barre de filtres)
    pub fn remove_active(&mut self, filter: &ActiveFilter) -> bool {
        match filter.dimension {
            Dimension::Racks => self.racks.remove(&filter.value),
            Dimension::EquipmentTypes => self.equipment_types.remove(&filter.value),
            Dimension::Categories => match filter.value.parse::<EquipmentCategory>() {
                Ok(category) => self.categories.remove(&category),
                Err(_) => false,
            },
            Dimension::Tags => self.tags.remove(&filter.value),
            Dimension::EquipmentName => {
                if self.name_query.is_empty() {
                    false
                } else {
                    self.name_query.clear();
                    true
                }
            }
        }
    }
}
