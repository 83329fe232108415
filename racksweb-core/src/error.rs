use std::path::PathBuf;

/// Erreurs de chargement de la configuration runtime
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid API url {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("failed to fetch runtime configuration: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// Erreurs possibles lors des appels à l'API RacksDB
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{resource} answered with status {status}")]
    Status { resource: String, status: u16 },
    #[error("cannot decode {resource}: {source}")]
    Decode {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
