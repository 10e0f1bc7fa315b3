//! HTTP surface for HTML imports.
//!
//! Routes:
//! - `POST /api/import-html` saves the posted page (and its markdown)
//! - `GET /health` liveness probe

use crate::error::Result;
use crate::services::{HtmdConverter, HtmlImporter, PathResolver};
use crate::types::{ImportRequest, ImportResponse, ServerConfig};
use anyhow::Context;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// State shared by all request handlers.
pub struct AppState {
    pub importer: HtmlImporter,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/import-html", post(import_html))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn import_html(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    let response = state.importer.import(&req).await?;
    Ok(Json(response))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Create the export root and serve until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.export_root)
        .await
        .with_context(|| format!("Failed to create export root {}", config.export_root.display()))?;
    let export_root = config
        .export_root
        .canonicalize()
        .context("Failed to resolve export root")?;
    info!("Export root: {}", export_root.display());

    let importer = HtmlImporter::new(
        PathResolver::new(export_root),
        Arc::new(HtmdConverter::new()),
    );
    let app = create_router(Arc::new(AppState { importer }));

    let listener = bind_listener(&config.host, config.port).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Bind `host:port`; `host` may be a hostname or an IPv4/IPv6 literal.
pub async fn bind_listener(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}
