//! Types des réponses de l'API RacksDB.
//!
//! The backend omits optional fields freely and sometimes sends `null` for
//! empty lists, so every non-identifying field is optional or defaulted.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datacenter {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<DatacenterRoom>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatacenterRoom {
    pub name: String,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<RacksRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub depth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacksRow {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub racks: Vec<RoomRack>,
    #[serde(default)]
    pub nbracks: u32,
}

/// Rack tel qu'il apparaît dans une rangée de salle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRack {
    pub name: String,
    /// Ratio 0.0..=1.0 des unités occupées
    #[serde(default)]
    pub fillrate: f64,
}

/// Rack renvoyé par la vue `racks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    pub name: String,
    #[serde(default)]
    pub datacenter: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub row: Option<String>,
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(default)]
    pub fillrate: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<RackNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackNode {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub infrastructure: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub layout: Vec<RackLayout>,
}

/// Équipements d'une infrastructure placés dans un rack donné
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RackLayout {
    pub rack: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<Equipment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: Vec<Equipment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: Vec<Equipment>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub misc: Vec<Equipment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[serde(default)]
    pub rack: Option<String>,
    #[serde(default)]
    pub slot: Option<u32>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Position dans le rack : hauteur en U, largeur en fraction de rack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
}

/// Spécification partagée d'un modèle d'équipement.
///
/// One struct covers the four categories: nodes fill `cpu`, `ram`, `storage`
/// and `netifs`, network gear fills `netifs`, storage arrays fill `disks`,
/// misc equipment only carries the common fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentType {
    pub id: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(default)]
    pub cpu: Option<Cpu>,
    #[serde(default)]
    pub ram: Option<Ram>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage: Vec<NodeStorage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub netifs: Vec<NetworkInterface>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disks: Vec<DiskGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cpu {
    #[serde(default)]
    pub sockets: Option<u32>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub specs: Option<String>,
    #[serde(default)]
    pub cores: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ram {
    #[serde(default)]
    pub dimm: Option<u32>,
    #[serde(default)]
    pub size: Option<Size>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStorage {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub size: Option<Size>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Débit en bits/s
    #[serde(default)]
    pub bandwidth: Option<u64>,
    #[serde(default)]
    pub number: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskGroup {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub number: Option<u32>,
}

/// Capacité en octets, ou valeur littérale quand le backend n'a pas converti (ex: "1TB")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Size {
    Bytes(u64),
    Literal(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infrastructure_tolerates_missing_and_null_fields() {
        let infra: Infrastructure = serde_json::from_value(json!({
            "name": "mercury",
            "tags": null,
            "layout": [
                {
                    "rack": "R1-A01",
                    "nodes": [
                        {"name": "mecn0001", "type": {"id": "sm220bt"}, "tags": null}
                    ],
                    "network": null
                }
            ]
        }))
        .unwrap();

        assert!(infra.tags.is_empty());
        assert_eq!(infra.description, None);
        let rack = &infra.layout[0];
        assert_eq!(rack.nodes.len(), 1);
        assert!(rack.network.is_empty());
        assert!(rack.storage.is_empty());
        assert!(rack.misc.is_empty());
        assert_eq!(rack.nodes[0].equipment_type.id, "sm220bt");
        assert!(rack.nodes[0].equipment_type.cpu.is_none());
    }

    #[test]
    fn test_size_accepts_numbers_and_literals() {
        let disks: Vec<DiskGroup> = serde_json::from_value(json!([
            {"type": "ssd", "size": 4398046511104u64, "number": 12},
            {"type": "hdd", "size": "1TB"}
        ]))
        .unwrap();

        assert_eq!(disks[0].size, Some(Size::Bytes(4 * 1024u64.pow(4))));
        assert_eq!(disks[1].size, Some(Size::Literal("1TB".into())));
        assert_eq!(disks[1].number, None);
    }

    #[test]
    fn test_datacenter_rooms_and_location() {
        let dc: Datacenter = serde_json::from_value(json!({
            "name": "paris",
            "location": {"latitude": 48.85, "longitude": 2.35},
            "rooms": [
                {
                    "name": "noisy",
                    "dimensions": {"width": 10000, "depth": 12000},
                    "rows": [{"name": "R1", "nbracks": 2, "racks": [{"name": "R1-A01", "fillrate": 0.5}]}]
                }
            ]
        }))
        .unwrap();

        assert_eq!(dc.location.map(|l| l.latitude), Some(48.85));
        assert_eq!(dc.rooms[0].rows[0].nbracks, 2);
        assert_eq!(dc.rooms[0].rows[0].racks[0].fillrate, 0.5);
        assert!(dc.tags.is_empty());
    }
}
