/*!
# RacksWeb DevKit - Stubs et Utilitaires pour Développement

Bibliothèque facilitant les tests du client RacksDB avec:
- Backend HTTP simulé (Axum) servant des fixtures
- Builders de fixtures au format de l'API RacksDB
- Harness de test avec attentes sur les requêtes reçues
*/

pub mod backend_stub;
pub mod fixtures;
pub mod test_utils;

pub use backend_stub::{RecordedRequest, StubBackend};
pub use fixtures::{DatacenterBuilder, Fixtures, InfrastructureBuilder, RackBuilder, RoomBuilder};
pub use test_utils::TestHarness;
