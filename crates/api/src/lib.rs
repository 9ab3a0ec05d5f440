//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes for contribution listings and statistics
//! - PDF report downloads
//! - JSON error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use dues_core::reports::ReportService;
use dues_core::source::RecordSource;
use dues_core::storage::DocumentStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where contribution and member rows come from.
    pub source: Arc<dyn RecordSource>,
    /// Report rendering with the configured branding.
    pub reports: Arc<ReportService>,
    /// Archive for finished reports (optional).
    pub archive: Option<Arc<DocumentStore>>,
}

impl AppState {
    /// Creates state without an archive.
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>, reports: ReportService) -> Self {
        Self {
            source,
            reports: Arc::new(reports),
            archive: None,
        }
    }

    /// Archives every generated report in `archive`.
    #[must_use]
    pub fn with_archive(mut self, archive: DocumentStore) -> Self {
        self.archive = Some(Arc::new(archive));
        self
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
