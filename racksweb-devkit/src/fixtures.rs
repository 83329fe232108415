/*!
Fixtures JSON au format de l'API RacksDB

Builders pour composer des infrastructures, datacenters et racks sans écrire
le JSON à la main. Les valeurs produites sont des `serde_json::Value`, servies
telles quelles par le backend stub.
*/

use serde_json::{json, Map, Value};

/// Jeu de données servi par le stub
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub datacenters: Vec<Value>,
    pub infrastructures: Vec<Value>,
    pub racks: Vec<Value>,
}

impl Fixtures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_datacenter(mut self, datacenter: Value) -> Self {
        self.datacenters.push(datacenter);
        self
    }

    pub fn with_infrastructure(mut self, infrastructure: Value) -> Self {
        self.infrastructures.push(infrastructure);
        self
    }

    pub fn with_rack(mut self, rack: Value) -> Self {
        self.racks.push(rack);
        self
    }

    /// Petit inventaire cohérent : un datacenter, une salle, deux infrastructures
    pub fn sample() -> Self {
        let mercury = InfrastructureBuilder::new("mercury")
            .description("HPC cluster")
            .tags(&["hpc"])
            .rack(
                RackBuilder::new("R01")
                    .node("mecn0001", node_type("sm220bt"), &["compute", "prod"])
                    .node("mecn0002", node_type("sm220bt"), &["compute"])
                    .network("mesw0001", switch_type("cisco-x"), &["infra"]),
            )
            .rack(
                RackBuilder::new("R02")
                    .node("megpu0001", node_type("dgx"), &["gpu", "prod"])
                    .storage("mestor0001", storage_type("netapp"), &[])
                    .misc("mepdu0001", misc_type("apc-pdu"), &["infra"]),
            )
            .build();
        let core = InfrastructureBuilder::new("core")
            .rack(RackBuilder::new("R01").network("coresw1", switch_type("cisco-x"), &[]))
            .build();

        let paris = DatacenterBuilder::new("paris")
            .tags(&["tier3"])
            .location(48.85, 2.35)
            .room(
                RoomBuilder::new("noisy", 10_000.0, 8_000.0)
                    .row("A", &[("R01", 0.5), ("R02", 0.25)])
                    .row("B", &[("R10", 0.0)]),
            )
            .room(RoomBuilder::new("quiet", 5_000.0, 4_000.0))
            .build();

        Self::new()
            .with_datacenter(paris)
            .with_infrastructure(mercury)
            .with_infrastructure(core)
            .with_rack(rack_summary("R01", "paris", "noisy", 0.5, &["mecn0001", "coresw1"]))
            .with_rack(rack_summary("R02", "paris", "noisy", 0.25, &["megpu0001"]))
    }
}

fn tags(values: &[&str]) -> Value {
    Value::from(values.iter().map(|t| t.to_string()).collect::<Vec<_>>())
}

pub fn node_type(id: &str) -> Value {
    json!({
        "id": id,
        "model": format!("{id} model"),
        "height": 1,
        "width": 0.5,
        "cpu": {"sockets": 2, "model": "AMD EPYC 7763", "cores": 64},
        "ram": {"dimm": 16, "size": 34359738368u64},
        "storage": [{"type": "ssd", "model": "Micron 7450", "size": 1920383410176u64}],
        "netifs": [{"type": "ethernet", "bandwidth": 25000000000u64}]
    })
}

pub fn switch_type(id: &str) -> Value {
    json!({
        "id": id,
        "model": format!("{id} model"),
        "height": 1,
        "width": 1,
        "netifs": [{"type": "ethernet", "bandwidth": 100000000000u64, "number": 48}]
    })
}

pub fn storage_type(id: &str) -> Value {
    json!({
        "id": id,
        "model": format!("{id} model"),
        "height": 2,
        "width": 1,
        "disks": [{"type": "ssd", "model": "Samsung PM1733", "size": 4398046511104u64, "number": 24}]
    })
}

pub fn misc_type(id: &str) -> Value {
    json!({"id": id, "height": 1, "width": 1})
}

pub fn rack_summary(name: &str, datacenter: &str, room: &str, fillrate: f64, nodes: &[&str]) -> Value {
    json!({
        "name": name,
        "datacenter": datacenter,
        "room": room,
        "fillrate": fillrate,
        "nodes": nodes.iter().map(|n| json!({"name": n})).collect::<Vec<_>>()
    })
}

pub struct InfrastructureBuilder {
    payload: Map<String, Value>,
    layout: Vec<Value>,
}

impl InfrastructureBuilder {
    pub fn new(name: &str) -> Self {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::from(name));
        Self {
            payload,
            layout: Vec::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.payload.insert("description".into(), Value::from(description));
        self
    }

    pub fn tags(mut self, values: &[&str]) -> Self {
        self.payload.insert("tags".into(), tags(values));
        self
    }

    pub fn rack(mut self, rack: RackBuilder) -> Self {
        self.layout.push(rack.build());
        self
    }

    pub fn build(mut self) -> Value {
        self.payload.insert("layout".into(), Value::Array(self.layout));
        Value::Object(self.payload)
    }
}

/// Une entrée du layout : équipements d'un rack par catégorie
pub struct RackBuilder {
    rack: String,
    nodes: Vec<Value>,
    network: Vec<Value>,
    storage: Vec<Value>,
    misc: Vec<Value>,
}

impl RackBuilder {
    pub fn new(rack: &str) -> Self {
        Self {
            rack: rack.to_string(),
            nodes: Vec::new(),
            network: Vec::new(),
            storage: Vec::new(),
            misc: Vec::new(),
        }
    }

    fn equipment(&self, name: &str, equipment_type: Value, tag_values: &[&str]) -> Value {
        json!({"name": name, "type": equipment_type, "rack": self.rack, "tags": tags(tag_values)})
    }

    pub fn node(mut self, name: &str, equipment_type: Value, tags: &[&str]) -> Self {
        let item = self.equipment(name, equipment_type, tags);
        self.nodes.push(item);
        self
    }

    pub fn network(mut self, name: &str, equipment_type: Value, tags: &[&str]) -> Self {
        let item = self.equipment(name, equipment_type, tags);
        self.network.push(item);
        self
    }

    pub fn storage(mut self, name: &str, equipment_type: Value, tags: &[&str]) -> Self {
        let item = self.equipment(name, equipment_type, tags);
        self.storage.push(item);
        self
    }

    pub fn misc(mut self, name: &str, equipment_type: Value, tags: &[&str]) -> Self {
        let item = self.equipment(name, equipment_type, tags);
        self.misc.push(item);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "rack": self.rack,
            "nodes": self.nodes,
            "network": self.network,
            "storage": self.storage,
            "misc": self.misc
        })
    }
}

pub struct DatacenterBuilder {
    payload: Map<String, Value>,
    rooms: Vec<Value>,
}

impl DatacenterBuilder {
    pub fn new(name: &str) -> Self {
        let mut payload = Map::new();
        payload.insert("name".into(), Value::from(name));
        Self {
            payload,
            rooms: Vec::new(),
        }
    }

    pub fn tags(mut self, values: &[&str]) -> Self {
        self.payload.insert("tags".into(), tags(values));
        self
    }

    pub fn location(mut self, latitude: f64, longitude: f64) -> Self {
        self.payload
            .insert("location".into(), json!({"latitude": latitude, "longitude": longitude}));
        self
    }

    pub fn room(mut self, room: RoomBuilder) -> Self {
        self.rooms.push(room.build());
        self
    }

    pub fn build(mut self) -> Value {
        self.payload.insert("rooms".into(), Value::Array(self.rooms));
        Value::Object(self.payload)
    }
}

/// Salle avec dimensions en millimètres
pub struct RoomBuilder {
    name: String,
    width: f64,
    depth: f64,
    rows: Vec<Value>,
}

impl RoomBuilder {
    pub fn new(name: &str, width: f64, depth: f64) -> Self {
        Self {
            name: name.to_string(),
            width,
            depth,
            rows: Vec::new(),
        }
    }

    /// `racks` : paires (nom, taux de remplissage)
    pub fn row(mut self, name: &str, racks: &[(&str, f64)]) -> Self {
        let racks: Vec<Value> = racks
            .iter()
            .map(|(rack, fillrate)| json!({"name": rack, "fillrate": fillrate}))
            .collect();
        self.rows.push(json!({"name": name, "nbracks": racks.len(), "racks": racks}));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "name": self.name,
            "dimensions": {"width": self.width, "depth": self.depth},
            "rows": self.rows
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infrastructure_builder_layout() {
        let infra = InfrastructureBuilder::new("mercury")
            .rack(RackBuilder::new("R01").node("cn1", node_type("sm220bt"), &["prod"]))
            .build();

        assert_eq!(infra["name"], "mercury");
        let rack = &infra["layout"][0];
        assert_eq!(rack["rack"], "R01");
        assert_eq!(rack["nodes"][0]["type"]["id"], "sm220bt");
        assert_eq!(rack["nodes"][0]["tags"][0], "prod");
        assert!(rack["misc"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_room_builder_counts_racks() {
        let room = RoomBuilder::new("noisy", 1000.0, 2000.0)
            .row("A", &[("R01", 0.1), ("R02", 0.0)])
            .build();
        assert_eq!(room["rows"][0]["nbracks"], 2);
        assert_eq!(room["dimensions"]["depth"], 2000.0);
    }

    #[test]
    fn test_sample_is_consistent() {
        let sample = Fixtures::sample();
        assert_eq!(sample.datacenters.len(), 1);
        assert_eq!(sample.infrastructures.len(), 2);
        let racks: Vec<&str> = sample.infrastructures[0]["layout"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["rack"].as_str())
            .collect();
        assert_eq!(racks, vec!["R01", "R02"]);
    }
}
