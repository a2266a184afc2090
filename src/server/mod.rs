//! HTTP surface: `POST /analyze` and a health probe.

pub mod error;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::report::{self, Report};
use crate::repo::SignalSource;
use error::ApiResult;

/// Shared, read-only state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SignalSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn SignalSource>) -> Self {
        Self { source }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub repo_url: String,
}

/// Any origin, method and header is allowed.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, source = state.source.name(), "listening");
    axum::serve(listener, router(state)).await
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<Report>> {
    let report = report::analyze(state.source.as_ref(), &request.repo_url).await?;
    Ok(Json(report))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
