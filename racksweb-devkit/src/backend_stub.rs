/*!
Backend RacksDB simulé pour tests sans serveur réel

Serveur Axum sur 127.0.0.1 (port éphémère) qui sert des fixtures sous le
préfixe de version, applique le filtre `?name=`, répond aux endpoints `draw`
par un SVG minimal et enregistre chaque requête reçue.
*/

use crate::fixtures::Fixtures;
use anyhow::Result;
use axum::extract::{Path, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

#[derive(Clone)]
struct StubState {
    fixtures: Arc<Mutex<Fixtures>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    forced_status: Arc<Mutex<Option<StatusCode>>>,
    server_url: String,
    version: String,
}

/// Backend simulé, arrêté au drop
pub struct StubBackend {
    addr: SocketAddr,
    state: StubState,
    handle: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start(version: &str, fixtures: Fixtures) -> Result<Self> {
        env_logger::try_init().ok();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = StubState {
            fixtures: Arc::new(Mutex::new(fixtures)),
            requests: Arc::new(Mutex::new(Vec::new())),
            forced_status: Arc::new(Mutex::new(None)),
            server_url: format!("http://{addr}"),
            version: version.trim_matches('/').to_string(),
        };

        let app = build_router(state.clone());
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("❌ [STUB] server stopped: {e}");
            }
        });

        log::info!("🧪 [STUB] RacksDB backend listening on {addr} (version {version:?})");
        Ok(Self { addr, state, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// URL du serveur, sans la version
    pub fn server_url(&self) -> String {
        self.state.server_url.clone()
    }

    pub fn version(&self) -> &str {
        &self.state.version
    }

    /// URL du `config.json` qui pointe vers ce stub
    pub fn config_url(&self) -> String {
        format!("{}/config.json", self.state.server_url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().clear();
    }

    /// Toutes les routes de l'API répondent `status` jusqu'au prochain reset
    pub fn fail_with(&self, status: u16) -> Result<()> {
        let status = StatusCode::from_u16(status)?;
        *self.state.forced_status.lock() = Some(status);
        Ok(())
    }

    pub fn reset_failure(&self) {
        *self.state.forced_status.lock() = None;
    }

    pub fn replace_fixtures(&self, fixtures: Fixtures) {
        *self.state.fixtures.lock() = fixtures;
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn build_router(state: StubState) -> Router {
    let api = Router::new()
        .route("/datacenters", get(get_datacenters))
        .route("/infrastructures", get(get_infrastructures))
        .route("/racks", get(get_racks))
        .route("/draw/{entity}/{file}", post(draw))
        .layer(middleware::from_fn_with_state(state.clone(), forced_failure));

    let api = if state.version.is_empty() {
        api
    } else {
        Router::new().nest(&format!("/{}", state.version), api)
    };

    Router::new()
        .route("/config.json", get(runtime_config))
        .merge(api)
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(State(state): State<StubState>, req: Request, next: Next) -> Response {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
    };
    log::debug!("📨 [STUB] {} {}", recorded.method, recorded.path);
    state.requests.lock().push(recorded);
    next.run(req).await
}

async fn forced_failure(State(state): State<StubState>, req: Request, next: Next) -> Response {
    let forced = *state.forced_status.lock();
    match forced {
        Some(status) => status.into_response(),
        None => next.run(req).await,
    }
}

#[derive(Debug, Deserialize)]
struct NameFilter {
    name: Option<String>,
}

fn filtered(items: &[Value], filter: &NameFilter) -> Vec<Value> {
    items
        .iter()
        .filter(|item| match &filter.name {
            Some(name) => item.get("name").and_then(Value::as_str) == Some(name.as_str()),
            None => true,
        })
        .cloned()
        .collect()
}

async fn get_datacenters(State(state): State<StubState>, Query(filter): Query<NameFilter>) -> Json<Vec<Value>> {
    Json(filtered(&state.fixtures.lock().datacenters, &filter))
}

async fn get_infrastructures(State(state): State<StubState>, Query(filter): Query<NameFilter>) -> Json<Vec<Value>> {
    Json(filtered(&state.fixtures.lock().infrastructures, &filter))
}

async fn get_racks(State(state): State<StubState>, Query(filter): Query<NameFilter>) -> Json<Vec<Value>> {
    Json(filtered(&state.fixtures.lock().racks, &filter))
}

async fn draw(
    State(state): State<StubState>,
    Path((entity, file)): Path<(String, String)>,
) -> Result<Response, StatusCode> {
    let name = file.strip_suffix(".svg").ok_or(StatusCode::NOT_FOUND)?;
    let fixtures = state.fixtures.lock();
    let known = match entity.as_str() {
        "room" => fixtures.datacenters.iter().any(|dc| {
            dc["rooms"]
                .as_array()
                .is_some_and(|rooms| rooms.iter().any(|room| room["name"] == name))
        }),
        "infrastructure" => fixtures.infrastructures.iter().any(|infra| infra["name"] == name),
        _ => false,
    };
    if !known {
        return Err(StatusCode::NOT_FOUND);
    }

    let svg = format!(r#"<svg xmlns="http://www.w3.org/2000/svg"><title>{entity} {name}</title></svg>"#);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn runtime_config(State(state): State<StubState>) -> Json<Value> {
    Json(serde_json::json!({
        "API_SERVER": state.server_url,
        "API_VERSION": state.version,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixtures;

    #[tokio::test]
    async fn test_serves_versioned_collections_with_name_filter() {
        let stub = StubBackend::start("v0.5.0", Fixtures::sample()).await.unwrap();
        let base = format!("{}/v0.5.0", stub.server_url());

        let all: Vec<Value> = reqwest::get(format!("{base}/infrastructures"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let one: Vec<Value> = reqwest::get(format!("{base}/infrastructures?name=core"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0]["name"], "core");

        let requests = stub.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].path, "/v0.5.0/infrastructures");
        assert_eq!(requests[1].query.as_deref(), Some("name=core"));
    }

    #[tokio::test]
    async fn test_draw_answers_svg_or_404() {
        let stub = StubBackend::start("", Fixtures::sample()).await.unwrap();
        let client = reqwest::Client::new();

        let response = client
            .post(format!("{}/draw/room/noisy.svg", stub.server_url()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
        assert!(response.text().await.unwrap().starts_with("<svg"));

        let missing = client
            .post(format!("{}/draw/infrastructure/pluto.svg", stub.server_url()))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), 404);
    }

    #[tokio::test]
    async fn test_forced_failure_and_config_endpoint() {
        let stub = StubBackend::start("v1", Fixtures::new()).await.unwrap();
        stub.fail_with(503).unwrap();

        let status = reqwest::get(format!("{}/v1/racks", stub.server_url())).await.unwrap().status();
        assert_eq!(status, 503);

        let config: Value = reqwest::get(stub.config_url()).await.unwrap().json().await.unwrap();
        assert_eq!(config["API_SERVER"], stub.server_url());
        assert_eq!(config["API_VERSION"], "v1");

        stub.reset_failure();
        let status = reqwest::get(format!("{}/v1/racks", stub.server_url())).await.unwrap().status();
        assert_eq!(status, 200);
    }
}
