/**
 * MODALE TYPE D'ÉQUIPEMENT - Fiche détaillée d'un modèle
 *
 * RÔLE :
 * Garde le type d'équipement cliqué et l'état ouvert/fermé de la fenêtre,
 * puis produit les lignes libellées à afficher.
 *
 * FONCTIONNEMENT :
 * - open() remplace le contenu et rend la modale visible
 * - close() masque la modale mais garde le contenu jusqu'au prochain open()
 * - Aucune validation : seules les lignes dont les champs existent sont produites
 */

use crate::models::EquipmentType;
use crate::units::{human_bandwidth, human_size};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquipmentTypeModal {
    content: Option<EquipmentType>,
    visible: bool,
}

impl EquipmentTypeModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, equipment_type: EquipmentType) {
        self.content = Some(equipment_type);
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Dernier contenu ouvert, encore présent après fermeture
    pub fn content(&self) -> Option<&EquipmentType> {
        self.content.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

/// Lignes de la fiche, dans l'ordre d'affichage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipmentTypeDetails {
    pub id: String,
    pub rows: Vec<DetailRow>,
}

impl From<&EquipmentType> for EquipmentTypeDetails {
    fn from(equipment_type: &EquipmentType) -> Self {
        let mut rows = Vec::new();
        let mut push = |label: &'static str, value: String| {
            if !value.is_empty() {
                rows.push(DetailRow { label, value });
            }
        };

        if let Some(model) = &equipment_type.model {
            push("Model", model.clone());
        }
        if let Some(height) = equipment_type.height {
            let size = match equipment_type.width {
                Some(width) => format!("{}U × {}", number(height), number(width)),
                None => format!("{}U", number(height)),
            };
            push("Size", size);
        }
        if let Some(specs) = &equipment_type.specs {
            push("Specs", specs.clone());
        }

        if let Some(cpu) = &equipment_type.cpu {
            let mut value = join([cpu.sockets.map(|s| s.to_string()), cpu.model.clone()], " × ");
            if let Some(cores) = cpu.cores {
                value = join([Some(value), Some(format!("({cores} cores)"))], " ");
            }
            push("CPU", value);
            if let Some(specs) = &cpu.specs {
                push("CPU specs", specs.clone());
            }
        }
        if let Some(ram) = &equipment_type.ram {
            push(
                "RAM",
                join([ram.dimm.map(|d| d.to_string()), ram.size.as_ref().map(human_size)], " × "),
            );
        }
        for device in &equipment_type.storage {
            push(
                "Storage",
                join(
                    [device.kind.clone(), device.model.clone(), device.size.as_ref().map(human_size)],
                    " ",
                ),
            );
        }
        for netif in &equipment_type.netifs {
            let interface = join([netif.kind.clone(), netif.bandwidth.map(human_bandwidth)], " ");
            push(
                "Network interface",
                join([netif.number.map(|n| n.to_string()), Some(interface)], " × "),
            );
        }
        for disks in &equipment_type.disks {
            let disk = join(
                [disks.model.clone(), disks.kind.clone(), disks.size.as_ref().map(human_size)],
                " ",
            );
            push("Disks", join([disks.number.map(|n| n.to_string()), Some(disk)], " × "));
        }

        Self {
            id: equipment_type.id.clone(),
            rows,
        }
    }
}

impl fmt::Display for EquipmentTypeDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.id)?;
        let width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
        }
        Ok(())
    }
}

fn join<const N: usize>(parts: [Option<String>; N], separator: &str) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
