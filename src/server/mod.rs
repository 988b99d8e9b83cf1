//! HTTP facade: JSON API under `/api`, health probe, and the static frontend
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/healthz` | GET | 204 when healthy, 503 otherwise |
//! | `/api/status` | GET | Version, build and host details |
//! | `/api/namespaces` | GET | All namespaces visible to the server |
//! | `/api/scrape/:namespace` | GET | Every watched object kind in a namespace |
//!
//! Assets under `/js`, `/css`, `/img` and `/favicon.png` come from the static
//! directory. Any other path gets its `index.html` so the frontend can handle
//! its own routes.

pub mod handlers;
pub mod state;

pub use state::AppState;

use crate::Result;
use axum::extract::{ConnectInfo, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info};

/// Frontend asset directories served as-is; everything else gets `index.html`
const ASSET_DIRS: [&str; 3] = ["js", "css", "img"];

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let mut app = Router::new()
        .route("/healthz", get(handlers::healthz))
        .route("/api/status", get(handlers::status))
        .route("/api/namespaces", get(handlers::namespaces))
        .route("/api/scrape/:namespace", get(handlers::scrape_namespace));

    for dir in ASSET_DIRS {
        app = app.nest_service(&format!("/{}", dir), ServeDir::new(static_dir.join(dir)));
    }

    app.route_service("/favicon.png", ServeFile::new(static_dir.join("favicon.png")))
        .fallback_service(ServeFile::new(static_dir.join("index.html")))
        .layer(middleware::from_fn(log_requests))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Serve until Ctrl+C is received
pub async fn serve(state: AppState, static_dir: &Path, addr: SocketAddr) -> Result<()> {
    let app = router(state, static_dir);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    info!("{} {} {}", client, request.method(), request.uri());

    next.run(request).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
