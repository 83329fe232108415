/*!
Test Harness pour le client RacksDB

Facilite l'écriture de tests d'intégration avec:
- Démarrage automatique du backend simulé
- Attentes sur les requêtes reçues (méthode, chemin, query)
- Statistiques des appels pour le debug
*/

use crate::backend_stub::{RecordedRequest, StubBackend};
use crate::fixtures::Fixtures;
use anyhow::Result;
use std::collections::HashMap;

pub const DEFAULT_API_VERSION: &str = "v0.5.0";

/// Harness de test complet : backend simulé + attentes
pub struct TestHarness {
    pub backend: StubBackend,
    expectations: Vec<Expectation>,
}

#[derive(Debug)]
struct Expectation {
    method: String,
    path: String,
    expected_count: usize,
}

impl TestHarness {
    /// Démarre le backend avec l'inventaire d'exemple
    pub async fn start() -> Result<Self> {
        Self::start_with(DEFAULT_API_VERSION, Fixtures::sample()).await
    }

    pub async fn start_with(version: &str, fixtures: Fixtures) -> Result<Self> {
        env_logger::try_init().ok(); // Init logging pour tests

        Ok(Self {
            backend: StubBackend::start(version, fixtures).await?,
            expectations: Vec::new(),
        })
    }

    /// Valeur de `API_SERVER` à donner au client
    pub fn api_server(&self) -> String {
        self.backend.server_url()
    }

    /// Valeur de `API_VERSION` à donner au client
    pub fn api_version(&self) -> String {
        self.backend.version().to_string()
    }

    /// Chemin complet d'une ressource, préfixe de version inclus
    pub fn api_path(&self, resource: &str) -> String {
        let version = self.backend.version();
        if version.is_empty() {
            format!("/{resource}")
        } else {
            format!("/{version}/{resource}")
        }
    }

    /// On s'attend à recevoir N requêtes `method` sur `resource`
    pub fn expect_requests(&mut self, method: &str, resource: &str, count: usize) -> &mut Self {
        let path = self.api_path(resource);
        self.expectations.push(Expectation {
            method: method.to_string(),
            path,
            expected_count: count,
        });
        self
    }

    fn matching(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.backend
            .requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// Vérifie toutes les expectations configurées
    pub fn verify_expectations(&self) -> Result<()> {
        log::info!("🔍 Verifying {} expectations...", self.expectations.len());

        for expectation in &self.expectations {
            let actual_count = self.matching(&expectation.method, &expectation.path).len();
            if actual_count != expectation.expected_count {
                anyhow::bail!(
                    "Expectation failed for {} {}: expected {} requests, got {}",
                    expectation.method,
                    expectation.path,
                    expectation.expected_count,
                    actual_count
                );
            }
            log::info!("✅ {} {}: {} requests as expected", expectation.method, expectation.path, actual_count);
        }
        Ok(())
    }

    /// Assert qu'une requête a été reçue avec cette query string
    pub fn assert_requested(&self, method: &str, resource: &str, query: Option<&str>) -> Result<()> {
        let path = self.api_path(resource);
        if self
            .matching(method, &path)
            .iter()
            .any(|r| r.query.as_deref() == query)
        {
            return Ok(());
        }
        anyhow::bail!("No {method} {path} with query {query:?} was received");
    }

    pub fn get_stats(&self) -> TestStats {
        let requests = self.backend.requests();
        let mut path_counts = HashMap::new();
        for request in &requests {
            *path_counts
                .entry(format!("{} {}", request.method, request.path))
                .or_insert(0) += 1;
        }
        TestStats {
            total_requests: requests.len(),
            path_counts,
        }
    }

    /// Reset le harness pour un nouveau scénario
    pub fn reset(&mut self) {
        self.backend.clear_requests();
        self.backend.reset_failure();
        self.expectations.clear();
        log::info!("🧹 Test harness reset");
    }
}

#[derive(Debug)]
pub struct TestStats {
    pub total_requests: usize,
    pub path_counts: HashMap<String, usize>,
}

impl TestStats {
    pub fn print(&self) {
        println!("📊 Backend statistics:");
        println!("  Total requests: {}", self.total_requests);
        for (path, count) in &self.path_counts {
            println!("    {}: {} requests", path, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_harness_tracks_expectations() {
        let mut harness = TestHarness::start().await.unwrap();
        harness.expect_requests("GET", "datacenters", 1);

        let url = format!("{}{}?name=paris", harness.api_server(), harness.api_path("datacenters"));
        let status = reqwest::get(url).await.unwrap().status();
        assert!(status.is_success());

        harness.verify_expectations().unwrap();
        harness.assert_requested("GET", "datacenters", Some("name=paris")).unwrap();
        assert!(harness.assert_requested("GET", "racks", None).is_err());
        assert_eq!(harness.get_stats().total_requests, 1);

        harness.reset();
        assert_eq!(harness.get_stats().total_requests, 0);
        harness.verify_expectations().unwrap();
    }

    #[tokio::test]
    async fn test_api_path_without_version() {
        let harness = TestHarness::start_with("", Fixtures::new()).await.unwrap();
        assert_eq!(harness.api_path("racks"), "/racks");
        assert_eq!(harness.api_version(), "");
    }
}
