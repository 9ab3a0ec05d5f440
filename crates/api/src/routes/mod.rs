//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod contributions;
pub mod health;
pub mod reports;

#[cfg(test)]
mod tests;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(contributions::routes())
        .merge(reports::routes())
}
