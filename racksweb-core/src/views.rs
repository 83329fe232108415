//! Projections des listes : accueil, sélecteurs, salles d'un datacenter,
//! racks d'une salle.

use crate::filter::contains_ignore_case;
use crate::models::{Datacenter, DatacenterRoom, Dimensions, Infrastructure};
use std::collections::{BTreeSet, HashMap};

/// `1 datacenter`, `2 datacenters`, `0 infrastructures`
pub fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// `-` quand vide, sinon liste séparée par des virgules
pub fn list_label<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "-".into();
    }
    items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}

/// Dimensions d'une salle, en mètres (le backend les donne en millimètres)
pub fn dimensions_label(dimensions: Option<&Dimensions>) -> String {
    match dimensions {
        Some(d) => format!("{}m × {}m", d.width / 1000.0, d.depth / 1000.0),
        None => "-".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub datacenters: Vec<String>,
    pub infrastructures: Vec<String>,
}

impl Overview {
    pub fn new(datacenters: &[Datacenter], infrastructures: &[Infrastructure]) -> Self {
        Self {
            datacenters: datacenters.iter().map(|d| d.name.clone()).collect(),
            infrastructures: infrastructures.iter().map(|i| i.name.clone()).collect(),
        }
    }

    pub fn datacenters_label(&self) -> String {
        count_label(self.datacenters.len(), ItemKind::Datacenter.noun())
    }

    pub fn infrastructures_label(&self) -> String {
        count_label(self.infrastructures.len(), ItemKind::Infrastructure.noun())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Datacenter,
    Infrastructure,
}

impl ItemKind {
    pub fn noun(self) -> &'static str {
        match self {
            ItemKind::Datacenter => "datacenter",
            ItemKind::Infrastructure => "infrastructure",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ItemKind::Datacenter => "Select a datacenter",
            ItemKind::Infrastructure => "Select an infrastructure",
        }
    }
}

/// Liste déroulante filtrable d'éléments d'un même type
#[derive(Debug, Clone)]
pub struct ItemPicker {
    pub kind: ItemKind,
    items: Vec<String>,
    pub query: String,
}

impl ItemPicker {
    pub fn new(kind: ItemKind, items: Vec<String>) -> Self {
        Self {
            kind,
            items,
            query: String::new(),
        }
    }

    pub fn matches(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| contains_ignore_case(item, &self.query))
            .map(String::as_str)
            .collect()
    }

    /// Texte affiché tant que rien n'est saisi
    pub fn placeholder(&self) -> &'static str {
        self.kind.placeholder()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub name: String,
    pub dimensions: Option<Dimensions>,
    pub racks: u32,
}

impl From<&DatacenterRoom> for RoomSummary {
    fn from(room: &DatacenterRoom) -> Self {
        Self {
            name: room.name.clone(),
            dimensions: room.dimensions,
            racks: room.rows.iter().map(|row| row.nbracks).sum(),
        }
    }
}

/// Salles d'un datacenter dont le nom contient `query`
pub fn datacenter_rooms(datacenter: &Datacenter, query: &str) -> Vec<RoomSummary> {
    datacenter
        .rooms
        .iter()
        .filter(|room| contains_ignore_case(&room.name, query))
        .map(RoomSummary::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomRackSummary {
    pub name: String,
    /// Taux de remplissage en pourcentage entier
    pub fill_percent: u32,
    pub infrastructures: Vec<String>,
}

/// Racks d'une salle, avec les infrastructures qui y placent des équipements
pub fn room_racks(room: &DatacenterRoom, infrastructures: &[Infrastructure], query: &str) -> Vec<RoomRackSummary> {
    let mut by_rack: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for infrastructure in infrastructures {
        for layout in &infrastructure.layout {
            by_rack
                .entry(layout.rack.as_str())
                .or_default()
                .insert(infrastructure.name.as_str());
        }
    }

    room.rows
        .iter()
        .flat_map(|row| row.racks.iter())
        .filter(|rack| contains_ignore_case(&rack.name, query))
        .map(|rack| RoomRackSummary {
            name: rack.name.clone(),
            fill_percent: (rack.fillrate * 100.0).round().max(0.0) as u32,
            infrastructures: by_rack
                .get(rack.name.as_str())
                .map(|names| names.iter().map(|n| n.to_string()).collect())
                .unwrap_or_default(),
        })
        .collect()
}
