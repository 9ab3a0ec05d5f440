//! PDF report routes.
//!
//! Every report is rendered off the async runtime and returned as an
//! attachment. When an archive is configured the same bytes are stored first.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use dues_core::contribution::{
    ContributionError, ContributionFilter, ContributionType, FilterParams, MemberFilter,
};
use dues_core::reports::naming;
use dues_core::reports::{RenderError, RenderedReport, ReportService};
use dues_core::stats::Aggregator;
use dues_shared::AppError;
use dues_shared::types::MemberId;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/monthly", get(get_monthly_report))
        .route("/reports/member/{id}", get(get_member_report))
        .route("/reports/event/{type}", get(get_event_report))
        .route("/reports/members", get(get_members_report))
        .route("/reports/contributions", get(get_contributions_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the member roster.
#[derive(Debug, Default, Deserialize)]
pub struct MembersQuery {
    /// `active` or `inactive`.
    #[serde(default, alias = "statut")]
    pub status: Option<String>,
    /// Substring of the name or phone.
    #[serde(default)]
    pub search: Option<String>,
}

/// Date-only subset of the filter parameters.
fn date_filter(params: &FilterParams) -> Result<ContributionFilter, ContributionError> {
    FilterParams {
        date_start: params.date_start.clone(),
        date_fin: params.date_fin.clone(),
        ..FilterParams::default()
    }
    .parse()
}

fn stamp() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_monthly_report(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let filter = date_filter(&params)?;
    let (Some(start), Some(end)) = (filter.date_start, filter.date_end) else {
        return Err(AppError::Validation(
            "date_start and date_fin are required for the monthly report".to_string(),
        )
        .into());
    };

    let records = state.source.contributions(&filter).await?;
    let summary = Aggregator::compute_summary(&records, &filter);
    let label = format!("{start} au {end}");

    let report = render(&state, move |reports| {
        reports.generate_monthly_report(&label, &records, &summary)
    })
    .await?;
    deliver(&state, naming::monthly_file_name(start, end), report).await
}

async fn get_member_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let member_id = id
        .parse::<MemberId>()
        .map_err(|_| ContributionError::InvalidMemberId(id.clone()))?;

    let Some(member) = state.source.member(member_id).await? else {
        return Err(AppError::NotFound(format!("member {member_id}")).into());
    };

    let filter = date_filter(&params)?.with_member(member_id);
    let records = state.source.contributions(&filter).await?;

    let report = render(&state, move |reports| {
        reports.generate_member_report(&member, &records)
    })
    .await?;
    deliver(&state, naming::member_file_name(member_id, stamp()), report).await
}

async fn get_event_report(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let contribution_type: ContributionType = raw_type.parse()?;
    let filter = date_filter(&params)?.with_type(contribution_type);
    let records = state.source.contributions(&filter).await?;

    let report = render(&state, move |reports| {
        reports.generate_event_report(contribution_type, &records)
    })
    .await?;
    deliver(
        &state,
        naming::event_file_name(contribution_type, stamp()),
        report,
    )
    .await
}

async fn get_members_report(
    State(state): State<AppState>,
    Query(query): Query<MembersQuery>,
) -> Result<Response, ApiError> {
    let filter = MemberFilter::from_params(query.status.as_deref(), query.search.as_deref())?;
    let members = state.source.members(&filter).await?;

    let report = render(&state, move |reports| {
        reports.generate_members_report(&members)
    })
    .await?;
    deliver(&state, naming::members_file_name(stamp()), report).await
}

async fn get_contributions_report(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let filter = params.parse()?;
    let records = state.source.contributions(&filter).await?;

    let report = render(&state, move |reports| {
        reports.generate_contributions_report(&records)
    })
    .await?;
    deliver(&state, naming::contributions_file_name(stamp()), report).await
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Runs a render job on the blocking pool.
async fn render<F>(state: &AppState, job: F) -> Result<RenderedReport, ApiError>
where
    F: FnOnce(&ReportService) -> Result<RenderedReport, RenderError> + Send + 'static,
{
    let reports = Arc::clone(&state.reports);
    let report = tokio::task::spawn_blocking(move || job(&reports))
        .await
        .map_err(|e| AppError::Internal(format!("report task failed: {e}")))??;
    Ok(report)
}

/// Archives the report when configured and builds the download response.
async fn deliver(
    state: &AppState,
    file_name: String,
    report: RenderedReport,
) -> Result<Response, ApiError> {
    if let Some(archive) = &state.archive {
        archive.store(&file_name, report.bytes.clone()).await?;
    }

    info!(file = %file_name, pages = report.page_count, "serving report");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={file_name}"),
            ),
        ],
        report.bytes,
    )
        .into_response())
}
