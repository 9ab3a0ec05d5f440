//! Contribution listing and statistics routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::NaiveDate;
use dues_core::contribution::{
    ContributionError, ContributionFilter, ContributionRecord, FilterParams, StatsPeriod,
};
use dues_core::stats::{AggregateSummary, Aggregator, TypeAggregate};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// Creates the contribution routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contributions", get(list_contributions))
        .route("/contributions/celebrants", get(list_celebrants))
        .route("/contributions/stats/summary", get(get_summary))
        .route("/contributions/stats/by-type", get(get_by_type))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the statistics endpoints.
///
/// Explicit dates win over `period`; with neither, all contributions count.
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    /// Inclusive start date.
    #[serde(default, alias = "date_debut")]
    pub date_start: Option<String>,
    /// Inclusive end date.
    #[serde(default)]
    pub date_fin: Option<String>,
    /// `month` or `year`, ending today.
    #[serde(default)]
    pub period: Option<String>,
}

impl StatsQuery {
    /// Resolves the parameters into a date filter.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed date or unknown period.
    pub fn filter(&self, today: NaiveDate) -> Result<ContributionFilter, ContributionError> {
        let filter = FilterParams {
            date_start: self.date_start.clone(),
            date_fin: self.date_fin.clone(),
            ..FilterParams::default()
        }
        .parse()?;

        if filter.date_start.is_some() || filter.date_end.is_some() {
            return Ok(filter);
        }

        match self.period.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => {
                let (start, end) = raw.parse::<StatsPeriod>()?.range(today);
                Ok(filter.with_range(start, end))
            }
            None => Ok(filter),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_contributions(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<ContributionRecord>>, ApiError> {
    let filter = params.parse()?;
    let records = state.source.contributions(&filter).await?;
    Ok(Json(records))
}

async fn list_celebrants(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let records = state
        .source
        .contributions(&ContributionFilter::new())
        .await?;
    Ok(Json(Aggregator::distinct_officiants(&records)))
}

async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<AggregateSummary>, ApiError> {
    let filter = query.filter(today())?;
    let records = state.source.contributions(&filter).await?;
    Ok(Json(Aggregator::compute_summary(&records, &filter)))
}

async fn get_by_type(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Vec<TypeAggregate>>, ApiError> {
    let filter = query.filter(today())?;
    let records = state.source.contributions(&filter).await?;
    Ok(Json(Aggregator::compute_by_type(&records, &filter)))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
