//! Dues API Server
//!
//! Main entry point for the dues reporting service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dues_api::{AppState, create_router};
use dues_core::reports::{ReportBranding, ReportRenderer, ReportService};
use dues_core::storage::DocumentStore;
use dues_db::{DatabaseSource, connect_with_pool};
use dues_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dues=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect to database
    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // Report rendering with the configured branding
    let branding = ReportBranding::from(&config.reports);
    info!(
        organization = %branding.organization_name,
        currency = %branding.currency_unit,
        "Report branding configured"
    );
    let reports = ReportService::new(ReportRenderer::new(branding));

    let mut state = AppState::new(Arc::new(DatabaseSource::new(db)), reports);
    if let Some(provider) = &config.reports.archive {
        let archive = DocumentStore::from_provider(provider)?;
        info!(provider = archive.provider_name(), "Report archive enabled");
        state = state.with_archive(archive);
    }

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
