/**
 * VUE INFRASTRUCTURE - Store unique de l'écran de détail
 *
 * RÔLE :
 * Possède l'infrastructure chargée, son catalogue, les critères, l'affichage
 * des racks, le panneau de filtres et la modale.
 *
 * FONCTIONNEMENT :
 * - Toute mutation passe par dispatch(ViewAction)
 * - Après une action qui touche au résultat : ré-évaluation complète du
 *   catalogue puis réconciliation des drapeaux de racks
 * - Load avec le même Arc = catalogue conservé ; autre Arc = reconstruit
 * - Un seul propriétaire, aucune synchronisation
 */

use crate::catalog::{EquipmentCatalog, EquipmentRecord};
use crate::criteria::{ActiveFilter, Dimension, FilterCriteria, Selection};
use crate::facets::{FacetOptions, FacetSearch, FilterPanel};
use crate::grouping::{RackDisplay, RackGroup, SortOrder};
use crate::modal::EquipmentTypeModal;
use crate::models::{EquipmentType, Infrastructure};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum ViewAction {
    Load(Arc<Infrastructure>),
    Select(Selection),
    Deselect(Selection),
    ToggleSelection(Selection),
    SetNameQuery(String),
    ClearDimension(Dimension),
    ClearAll,
    RemoveBadge(ActiveFilter),
    ToggleRack(String),
    InvertSort,
    ToggleFilterPanel,
    SearchFacets(FacetSearch),
    OpenEquipmentType(EquipmentType),
    CloseModal,
}

impl ViewAction {
    fn changes_visible_set(&self) -> bool {
        matches!(
            self,
            ViewAction::Load(_)
                | ViewAction::Select(_)
                | ViewAction::Deselect(_)
                | ViewAction::ToggleSelection(_)
                | ViewAction::SetNameQuery(_)
                | ViewAction::ClearDimension(_)
                | ViewAction::ClearAll
                | ViewAction::RemoveBadge(_)
        )
    }
}

#[derive(Debug, Clone)]
pub struct InfrastructureView {
    catalog: EquipmentCatalog,
    criteria: FilterCriteria,
    display: RackDisplay,
    panel: FilterPanel,
    modal: EquipmentTypeModal,
    /// Indices dans le catalogue des records visibles
    visible: Vec<usize>,
}

impl InfrastructureView {
    pub fn new(infrastructure: Arc<Infrastructure>) -> Self {
        let mut view = Self {
            catalog: EquipmentCatalog::new(infrastructure),
            criteria: FilterCriteria::new(),
            display: RackDisplay::new(),
            panel: FilterPanel::default(),
            modal: EquipmentTypeModal::new(),
            visible: Vec::new(),
        };
        view.recompute();
        view
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        let recompute = action.changes_visible_set();
        match action {
            ViewAction::Load(infrastructure) => {
                self.catalog.refresh(&infrastructure);
            }
            ViewAction::Select(selection) => {
                self.criteria.add(selection);
            }
            ViewAction::Deselect(selection) => {
                self.criteria.remove(&selection);
            }
            ViewAction::ToggleSelection(selection) => {
                self.criteria.toggle(selection);
            }
            ViewAction::SetNameQuery(query) => self.criteria.set_name_query(query),
            ViewAction::ClearDimension(dimension) => self.criteria.clear(dimension),
            ViewAction::ClearAll => self.criteria.clear_all(),
            ViewAction::RemoveBadge(badge) => {
                self.criteria.remove_active(&badge);
            }
            ViewAction::ToggleRack(rack) => {
                if self.display.toggle(&rack).is_none() {
                    debug!(rack = %rack, "toggle ignored, rack not displayed");
                }
            }
            ViewAction::InvertSort => {
                self.display.invert_sort();
            }
            ViewAction::ToggleFilterPanel => {
                self.panel.toggle();
            }
            ViewAction::SearchFacets(search) => self.panel.search = search,
            ViewAction::OpenEquipmentType(equipment_type) => self.modal.open(equipment_type),
            ViewAction::CloseModal => self.modal.close(),
        }

        if recompute {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let records = self.catalog.records();
        self.visible = records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.criteria.matches(record))
            .map(|(index, _)| index)
            .collect();
        self.display
            .reconcile(self.visible.iter().map(|&i| records[i].rack.as_str()));

        debug!(
            infrastructure = %self.catalog.infrastructure().name,
            visible = self.visible.len(),
            total = records.len(),
            "equipment view recomputed"
        );
    }

    pub fn infrastructure(&self) -> &Arc<Infrastructure> {
        self.catalog.infrastructure()
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn visible_records(&self) -> Vec<&EquipmentRecord> {
        let records = self.catalog.records();
        self.visible.iter().map(|&i| &records[i]).collect()
    }

    pub fn groups(&self) -> Vec<RackGroup<'_>> {
        self.display.group(&self.visible_records())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_order(&self) -> SortOrder {
        self.display.order()
    }

    pub fn modal(&self) -> &EquipmentTypeModal {
        &self.modal
    }

    pub fn filter_panel(&self) -> &FilterPanel {
        &self.panel
    }

    /// Options du panneau, restreintes par les textes de recherche
    pub fn facets(&self) -> FacetOptions {
        FacetOptions::from_records(self.catalog.records()).narrowed(&self.panel.search)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// État vide explicite : aucun équipement ne passe les filtres
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipmentCategory;
    use serde_json::json;

    fn mercury() -> Arc<Infrastructure> {
        Arc::new(
            serde_json::from_value(json!({
                "name": "mercury",
                "layout": [
                    {
                        "rack": "R02",
                        "network": [{"name": "sw1", "type": {"id": "cisco-x"}, "tags": ["infra"]}]
                    },
                    {
                        "rack": "R01",
                        "nodes": [
                            {"name": "server1", "type": {"id": "dell-r740", "model": "Dell R740"}, "tags": ["prod"]},
                            {"name": "server2", "type": {"id": "dell-r740"}, "tags": ["test"]}
                        ]
                    }
                ]
            }))
            .unwrap(),
        )
    }

    fn racks(view: &InfrastructureView) -> Vec<String> {
        view.groups().iter().map(|g| g.rack.to_string()).collect()
    }

    #[test]
    fn test_initial_view_shows_everything_ascending() {
        let view = InfrastructureView::new(mercury());
        assert_eq!(view.visible_count(), 3);
        assert_eq!(racks(&view), vec!["R01", "R02"]);
        assert!(view.groups().iter().all(|g| g.expanded));
        assert!(!view.filter_panel().is_open());
        assert!(!view.modal().is_open());
    }

    #[test]
    fn test_dispatch_recomputes_on_every_criteria_change() {
        let mut view = InfrastructureView::new(mercury());
        view.dispatch(ViewAction::Select(Selection::Tag("prod".into())));
        assert_eq!(view.visible_count(), 1);
        assert_eq!(racks(&view), vec!["R01"]);

        view.dispatch(ViewAction::Select(Selection::Tag("infra".into())));
        assert_eq!(racks(&view), vec!["R01", "R02"]);

        view.dispatch(ViewAction::SetNameQuery("sw".into()));
        assert_eq!(view.visible_count(), 1);

        view.dispatch(ViewAction::ClearAll);
        assert_eq!(view.visible_count(), 3);
    }

    #[test]
    fn test_empty_state() {
        let mut view = InfrastructureView::new(mercury());
        view.dispatch(ViewAction::Select(Selection::Category(EquipmentCategory::Storage)));
        assert!(view.is_empty());
        assert!(view.groups().is_empty());

        let badge = view.criteria().active_filters().remove(0);
        view.dispatch(ViewAction::RemoveBadge(badge));
        assert!(!view.is_empty());
    }

    #[test]
    fn test_rack_flags_follow_visible_set() {
        let mut view = InfrastructureView::new(mercury());
        view.dispatch(ViewAction::ToggleRack("R02".into()));
        view.dispatch(ViewAction::ToggleRack("R01".into()));
        view.dispatch(ViewAction::ToggleRack("R01".into()));

        view.dispatch(ViewAction::ToggleSelection(Selection::EquipmentType("cisco-x".into())));
        let flags: Vec<(String, bool)> = view.groups().iter().map(|g| (g.rack.to_string(), g.expanded)).collect();
        assert_eq!(flags, vec![("R02".to_string(), false)]);

        view.dispatch(ViewAction::ToggleSelection(Selection::EquipmentType("cisco-x".into())));
        view.dispatch(ViewAction::Select(Selection::Rack("R01".into())));
        view.dispatch(ViewAction::Deselect(Selection::Rack("R01".into())));
        assert!(view.groups().iter().all(|g| g.expanded));
    }

    #[test]
    fn test_sort_inversion_does_not_touch_filters() {
        let mut view = InfrastructureView::new(mercury());
        view.dispatch(ViewAction::InvertSort);
        assert_eq!(view.sort_order(), SortOrder::Descending);
        assert_eq!(racks(&view), vec!["R02", "R01"]);
        assert!(view.criteria().is_empty());
        assert_eq!(view.visible_count(), 3);
    }

    #[test]
    fn test_load_same_arc_keeps_catalog_new_arc_rebuilds() {
        let infra = mercury();
        let mut view = InfrastructureView::new(Arc::clone(&infra));
        view.dispatch(ViewAction::Select(Selection::Rack("R02".into())));

        view.dispatch(ViewAction::Load(Arc::clone(&infra)));
        assert!(Arc::ptr_eq(view.infrastructure(), &infra));
        assert_eq!(view.visible_count(), 1);

        let mut smaller = (*infra).clone();
        smaller.layout.truncate(1);
        smaller.layout[0].network.clear();
        view.dispatch(ViewAction::Load(Arc::new(smaller)));
        assert_eq!(view.catalog().len(), 0);
        assert!(view.is_empty());
    }

    #[test]
    fn test_modal_and_panel_actions() {
        let mut view = InfrastructureView::new(mercury());
        let server1 = view.visible_records().into_iter().find(|r| r.name == "server1").unwrap();
        let equipment_type = server1.equipment_type.clone();
        view.dispatch(ViewAction::OpenEquipmentType(equipment_type));
        assert!(view.modal().is_open());
        view.dispatch(ViewAction::CloseModal);
        assert!(!view.modal().is_open());
        assert_eq!(view.modal().content().map(|t| t.id.as_str()), Some("dell-r740"));

        view.dispatch(ViewAction::ToggleFilterPanel);
        assert!(view.filter_panel().is_open());
        view.dispatch(ViewAction::SearchFacets(FacetSearch {
            racks: "01".into(),
            ..Default::default()
        }));
        assert_eq!(view.facets().racks, vec!["R01"]);
        assert_eq!(view.facets().tags, vec!["infra", "prod", "test"]);
    }
}
