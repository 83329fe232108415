//! Configuration runtime du client RacksDB.
//!
//! Same document as the web UI's `config.json`:
//! `{"API_SERVER": "http://localhost:5000", "API_VERSION": "v0.5.0"}`.
//! Read once at startup, then handed to [`crate::client::RacksDbClient::new`].

use crate::error::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

pub const CONFIG_PATH_ENV: &str = "RACKSWEB_CONFIG";
pub const API_SERVER_ENV: &str = "RACKSWEB_API_SERVER";
pub const API_VERSION_ENV: &str = "RACKSWEB_API_VERSION";
const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(rename = "API_SERVER", alias = "api_server")]
    pub api_server: String,
    #[serde(rename = "API_VERSION", alias = "api_version", default)]
    pub api_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_server: "http://localhost:5000".into(),
            api_version: String::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn new(api_server: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            api_server: api_server.into(),
            api_version: api_version.into(),
        }
    }

    /// Charge la config depuis `$RACKSWEB_CONFIG` (ou `config.json`) puis applique les overrides d'environnement
    pub async fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Ok(Self::load_from(&path).await?.with_env_overrides())
    }

    /// A missing file is not an error: the defaults are used.
    pub async fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("no config file at {}, using default configuration", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, path)?;
        info!("loaded runtime configuration from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(content)?),
            _ => Ok(serde_json::from_str(content)?),
        }
    }

    /// Récupère `config.json` servi par le même hôte que l'UI
    pub async fn fetch(url: &str) -> Result<Self, ConfigError> {
        let body = reqwest::get(url).await?.error_for_status()?.bytes().await?;
        let config: Self = serde_json::from_slice(&body)?;
        info!("fetched runtime configuration from {url}");
        Ok(config)
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_SERVER_ENV).ok(),
            std::env::var(API_VERSION_ENV).ok(),
        )
    }

    pub fn with_overrides(mut self, api_server: Option<String>, api_version: Option<String>) -> Self {
        if let Some(server) = api_server.filter(|s| !s.trim().is_empty()) {
            self.api_server = server;
        }
        if let Some(version) = api_version {
            self.api_version = version;
        }
        self
    }

    /// URL de base de l'API : serveur + version, toujours terminée par `/`.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            value: self.api_server.clone(),
            reason,
        };

        let mut url = Url::parse(self.api_server.trim()).map_err(|e| invalid(e.to_string()))?;
        let mut parts: Vec<String> = url
            .path_segments()
            .ok_or_else(|| invalid("not a base URL".into()))?
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        parts.extend(
            self.api_version
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        );

        url.path_segments_mut()
            .map_err(|_| invalid("not a base URL".into()))?
            .clear()
            .extend(&parts)
            .push("");
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }
}
