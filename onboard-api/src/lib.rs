//! onboard-api library interface
//!
//! Employee onboarding service: receives the multipart onboarding form,
//! assembles it into one [`models::EmployeeRecord`] and stores it.

pub mod api;
pub mod blob;
pub mod db;
pub mod error;
pub mod models;
pub mod submission;

pub use crate::error::{ApiError, ApiResult};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::blob::BlobStore;
use crate::db::RecordStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Where assembled records are persisted
    pub store: Arc<dyn RecordStore>,
    /// Where uploaded documents are written
    pub blobs: BlobStore,
    /// Largest accepted request body
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, blobs: BlobStore, max_upload_bytes: usize) -> Self {
        Self {
            store,
            blobs,
            max_upload_bytes,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .merge(api::onboarding_routes())
        .merge(api::health_routes())
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
