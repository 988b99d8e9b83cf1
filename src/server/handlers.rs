use crate::scrape::{self, ScrapeResult};
use crate::server::state::AppState;
use crate::{Result, BUILD_INFO, VERSION};
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::Json;
use k8s_openapi::api::core::v1::Namespace;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::error;

/// Toolchain the binary was built with, captured by the build script
pub const RUST_VERSION: &str = env!("KUBEVIEW_RUSTC_VERSION");

/// Informational snapshot returned by `/api/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub healthy: bool,
    pub version: String,
    pub build_info: String,
    pub hostname: String,
    pub os: String,
    #[serde(rename = "architecture")]
    pub arch: String,
    pub cpu_count: usize,
    pub rust_version: String,
    pub client_address: String,
    pub server_host: String,
}

pub async fn healthz(State(state): State<AppState>) -> StatusCode {
    if state.is_healthy() {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn status(
    State(state): State<AppState>,
    ConnectInfo(client): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    uri: Uri,
) -> Json<Status> {
    let hostname = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "hostname not available".to_string());

    // HTTP/2 carries the host in `:authority`, which ends up in the URI
    let server_host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();

    Json(Status {
        healthy: state.is_healthy(),
        version: VERSION.to_string(),
        build_info: BUILD_INFO.to_string(),
        hostname,
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cpu_count: std::thread::available_parallelism().map_or(1, |n| n.get()),
        rust_version: RUST_VERSION.to_string(),
        client_address: client.to_string(),
        server_host,
    })
}

pub async fn namespaces(State(state): State<AppState>) -> Result<Json<Vec<Namespace>>> {
    let namespaces = state.client().list_namespaces().await.map_err(|e| {
        error!("Kubernetes API error listing namespaces: {}", e);
        e
    })?;

    Ok(Json(namespaces))
}

pub async fn scrape_namespace(
    State(state): State<AppState>,
    Path(namespace): Path<String>,
) -> Result<Json<ScrapeResult>> {
    let result = scrape::scrape(state.client(), &namespace).await?;

    Ok(Json(result))
}
