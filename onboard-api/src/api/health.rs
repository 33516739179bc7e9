//! Liveness check for load balancers and deploy scripts

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Short git hash the binary was built from, `unknown` outside a checkout
    pub build: &'static str,
}

/// GET /health
///
/// Answers without touching the database, so it stays up while the store
/// is unreachable.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        build: env!("GIT_HASH"),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
