/**
 * CLIENT RACKSDB - Accès HTTP en lecture seule à l'API d'inventaire
 *
 * RÔLE :
 * Récupère datacenters, infrastructures, racks et diagrammes SVG, et les
 * remet déjà typés au reste de l'application.
 *
 * FONCTIONNEMENT :
 * - URL de base fournie par RuntimeConfig à la construction, jamais modifiée
 * - GET pour les collections (filtre ?name= pour un élément), POST sans corps
 *   pour les diagrammes
 * - Statut non-2xx → ClientError::Status ; JSON invalide → ClientError::Decode
 * - Aucun retry : l'appelant décide
 */

use crate::config::RuntimeConfig;
use crate::error::ClientError;
use crate::models::{Datacenter, Infrastructure, Rack};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

pub const SVG_MEDIA_TYPE: &str = "image/svg+xml";

/// Image renvoyée par les endpoints `draw`, traitée comme un blob opaque
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramKind {
    Room,
    Infrastructure,
}

impl DiagramKind {
    fn entity(self) -> &'static str {
        match self {
            DiagramKind::Room => "room",
            DiagramKind::Infrastructure => "infrastructure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RacksDbClient {
    http: Client,
    base: Url,
}

impl RacksDbClient {
    pub fn new(config: &RuntimeConfig) -> Result<Self, ClientError> {
        let base = config.api_base_url()?;
        let http = Client::builder()
            .user_agent(concat!("racksweb/", env!("CARGO_PKG_VERSION")))
            .build()?;
        info!("RacksDB client ready on {base}");
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn datacenters(&self) -> Result<Vec<Datacenter>, ClientError> {
        self.collection("datacenters", None).await
    }

    pub async fn datacenter(&self, name: &str) -> Result<Datacenter, ClientError> {
        let found: Vec<Datacenter> = self.collection("datacenters", Some(name)).await?;
        found
            .into_iter()
            .find(|dc| dc.name == name)
            .ok_or_else(|| ClientError::NotFound {
                kind: "datacenter",
                name: name.to_string(),
            })
    }

    pub async fn infrastructures(&self) -> Result<Vec<Infrastructure>, ClientError> {
        self.collection("infrastructures", None).await
    }

    pub async fn infrastructure(&self, name: &str) -> Result<Infrastructure, ClientError> {
        let found: Vec<Infrastructure> = self.collection("infrastructures", Some(name)).await?;
        found
            .into_iter()
            .find(|infra| infra.name == name)
            .ok_or_else(|| ClientError::NotFound {
                kind: "infrastructure",
                name: name.to_string(),
            })
    }

    pub async fn racks(&self) -> Result<Vec<Rack>, ClientError> {
        self.collection("racks", None).await
    }

    pub async fn room_diagram(&self, room: &str) -> Result<Diagram, ClientError> {
        self.diagram(DiagramKind::Room, room).await
    }

    pub async fn infrastructure_diagram(&self, name: &str) -> Result<Diagram, ClientError> {
        self.diagram(DiagramKind::Infrastructure, name).await
    }

    pub async fn diagram(&self, kind: DiagramKind, name: &str) -> Result<Diagram, ClientError> {
        let file = format!("{name}.svg");
        let url = self.endpoint(&["draw", kind.entity(), &file]);
        let resource = format!("{} diagram {name}", kind.entity());

        let response = self.send(Method::POST, url, &resource).await?;
        let media_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_string())
            .unwrap_or_else(|| SVG_MEDIA_TYPE.to_string());
        let bytes = response.bytes().await?.to_vec();

        info!("📐 fetched {resource} ({} bytes)", bytes.len());
        Ok(Diagram { media_type, bytes })
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        resource: &str,
        name: Option<&str>,
    ) -> Result<Vec<T>, ClientError> {
        let mut url = self.endpoint(&[resource]);
        if let Some(name) = name {
            url.query_pairs_mut().append_pair("name", name);
        }

        let body = self.send(Method::GET, url, resource).await?.bytes().await?;
        let items: Vec<T> = serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            resource: resource.to_string(),
            source,
        })?;
        info!("📦 fetched {} {resource}", items.len());
        Ok(items)
    }

    async fn send(&self, method: Method, url: Url, resource: &str) -> Result<reqwest::Response, ClientError> {
        debug!("{method} {url}");
        let response = self.http.request(method, url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
