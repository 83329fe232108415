/*!
# RacksWeb Core - Inventaire RacksDB côté client

Bibliothèque du client web RacksDB :
- Modèle des données renvoyées par l'API (datacenters, infrastructures, racks)
- Client HTTP en lecture seule et configuration runtime
- Catalogue d'équipements, critères et évaluation des filtres
- Regroupement par rack, modale des types d'équipement, store de la vue
*/

pub mod catalog;
pub mod client;
pub mod config;
pub mod criteria;
pub mod error;
pub mod facets;
pub mod filter;
pub mod grouping;
pub mod modal;
pub mod models;
pub mod state;
pub mod units;
pub mod views;

pub use catalog::{flatten, EquipmentCatalog, EquipmentCategory, EquipmentRecord};
pub use client::{Diagram, DiagramKind, RacksDbClient};
pub use config::RuntimeConfig;
pub use criteria::{ActiveFilter, Dimension, FilterCriteria, Selection};
pub use error::{ClientError, ConfigError};
pub use filter::evaluate;
pub use grouping::{RackDisplay, RackGroup, SortOrder};
pub use modal::{EquipmentTypeDetails, EquipmentTypeModal};
pub use state::{InfrastructureView, ViewAction};
