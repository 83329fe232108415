/**
 * REGROUPEMENT PAR RACK - Affichage de la vue filtrée
 *
 * RÔLE :
 * Range les records filtrés par rack, ordonne les racks (croissant par
 * défaut, inversable) et porte un drapeau "déplié" par rack.
 *
 * FONCTIONNEMENT :
 * - Ordre interne d'un rack = ordre de sortie de l'évaluateur
 * - Ordre des racks = ordre des octets de l'identifiant
 * - Un rack présent démarre déplié ; seul toggle() change son drapeau
 * - Un rack qui disparaît du résultat perd son drapeau (reconcile)
 */

use crate::catalog::EquipmentRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn inverted(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Un rack et ses équipements visibles
#[derive(Debug, Clone, PartialEq)]
pub struct RackGroup<'a> {
    pub rack: &'a str,
    pub expanded: bool,
    pub records: Vec<&'a EquipmentRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct RackDisplay {
    order: SortOrder,
    expanded: BTreeMap<String, bool>,
}

impl RackDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn invert_sort(&mut self) -> SortOrder {
        self.order = self.order.inverted();
        self.order
    }

    /// Returns the new flag, or None when the rack is not currently displayed.
    pub fn toggle(&mut self, rack: &str) -> Option<bool> {
        let flag = self.expanded.get_mut(rack)?;
        *flag = !*flag;
        Some(*flag)
    }

    pub fn is_expanded(&self, rack: &str) -> Option<bool> {
        self.expanded.get(rack).copied()
    }

    /// Aligne les drapeaux sur les racks présents : nouveaux racks dépliés,
    /// racks absents oubliés.
    pub fn reconcile<'r, I>(&mut self, present: I)
    where
        I: IntoIterator<Item = &'r str>,
    {
        let present: BTreeSet<&str> = present.into_iter().collect();
        self.expanded.retain(|rack, _| present.contains(rack.as_str()));
        for rack in present {
            self.expanded.entry(rack.to_string()).or_insert(true);
        }
    }

    /// Groupe les records filtrés. Les racks sans drapeau connu sont affichés dépliés.
    pub fn group<'a>(&self, records: &[&'a EquipmentRecord]) -> Vec<RackGroup<'a>> {
        let mut by_rack: BTreeMap<&'a str, Vec<&'a EquipmentRecord>> = BTreeMap::new();
        for &record in records {
            by_rack.entry(record.rack.as_str()).or_default().push(record);
        }

        let groups = by_rack.into_iter().map(|(rack, records)| RackGroup {
            rack,
            expanded: self.is_expanded(rack).unwrap_or(true),
            records,
        });
        match self.order {
            SortOrder::Ascending => groups.collect(),
            SortOrder::Descending => groups.rev().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipmentCategory;
    use crate::models::EquipmentType;

    fn record(name: &str, rack: &str) -> EquipmentRecord {
        EquipmentRecord {
            category: EquipmentCategory::Node,
            name: name.into(),
            rack: rack.into(),
            equipment_type: EquipmentType {
                id: "server".into(),
                ..Default::default()
            },
            position: None,
            tags: vec![],
        }
    }

    fn rack_order(groups: &[RackGroup<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.rack.to_string()).collect()
    }

    #[test]
    fn test_scenario_sort_and_invert() {
        let records = [record("sw1", "R02"), record("server1", "R01")];
        let visible: Vec<&EquipmentRecord> = records.iter().collect();
        let mut display = RackDisplay::new();
        display.reconcile(visible.iter().map(|r| r.rack.as_str()));

        assert_eq!(rack_order(&display.group(&visible)), vec!["R01", "R02"]);
        assert_eq!(display.invert_sort(), SortOrder::Descending);
        assert_eq!(rack_order(&display.group(&visible)), vec!["R02", "R01"]);
        assert_eq!(display.invert_sort(), SortOrder::Ascending);
    }

    #[test]
    fn test_grouping_is_a_partition_preserving_order() {
        let records = [
            record("a", "R10"),
            record("b", "R02"),
            record("c", "R10"),
            record("d", "R01"),
            record("e", "R02"),
        ];
        let visible: Vec<&EquipmentRecord> = records.iter().collect();
        let groups = RackDisplay::new().group(&visible);

        assert_eq!(rack_order(&groups), vec!["R01", "R02", "R10"]);
        let total: usize = groups.iter().map(|g| g.records.len()).sum();
        assert_eq!(total, records.len());
        for group in &groups {
            assert!(group.records.iter().all(|r| r.rack == group.rack));
        }
        let r10: Vec<&str> = groups[2].records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(r10, vec!["a", "c"]);
    }

    #[test]
    fn test_double_toggle_restores_flag() {
        let mut display = RackDisplay::new();
        display.reconcile(["R01", "R02"]);
        assert_eq!(display.is_expanded("R01"), Some(true));

        assert_eq!(display.toggle("R01"), Some(false));
        assert_eq!(display.toggle("R01"), Some(true));
        assert_eq!(display.toggle("R99"), None);
    }

    #[test]
    fn test_flags_survive_filter_change_while_rack_present() {
        let mut display = RackDisplay::new();
        display.reconcile(["R01", "R02"]);
        display.toggle("R01");

        display.reconcile(["R01"]);
        assert_eq!(display.is_expanded("R01"), Some(false));
        assert_eq!(display.is_expanded("R02"), None);
    }

    #[test]
    fn test_flag_reset_when_rack_leaves_and_returns() {
        let mut display = RackDisplay::new();
        display.reconcile(["R01", "R02"]);
        display.toggle("R02");

        display.reconcile(["R01"]);
        display.reconcile(["R01", "R02"]);
        assert_eq!(display.is_expanded("R02"), Some(true));
    }

    #[test]
    fn test_collapsed_flag_reaches_groups() {
        let records = [record("a", "R01"), record("b", "R02")];
        let visible: Vec<&EquipmentRecord> = records.iter().collect();
        let mut display = RackDisplay::new();
        display.reconcile(["R01", "R02"]);
        display.toggle("R02");

        let flags: Vec<bool> = display.group(&visible).iter().map(|g| g.expanded).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_empty_input_gives_no_groups() {
        assert!(RackDisplay::new().group(&[]).is_empty());
    }
}
