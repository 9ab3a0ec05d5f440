//! Router tests against an in-memory record source.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::NaiveDate;
use dues_core::contribution::{
    ContributionRecord, ContributionStatus, ContributionType, MemberRecord, MemberStatus,
};
use dues_core::reports::ReportService;
use dues_core::source::InMemorySource;
use dues_core::storage::DocumentStore;
use dues_shared::config::ArchiveProvider;
use dues_shared::types::{ContributionId, MemberId};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::Value;
use tower::ServiceExt;

use crate::{AppState, create_router};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn source() -> InMemorySource {
    InMemorySource::default()
        .with_member(
            MemberRecord::new(MemberId::new(1), "Mamadou Bah")
                .with_phone("620 00 00 01")
                .with_role("Trésorier"),
        )
        .with_member(
            MemberRecord::new(MemberId::new(2), "Fatoumata Sow")
                .with_status(MemberStatus::Inactive),
        )
        .with_contribution(
            ContributionRecord::new(
                ContributionId::new(1),
                ContributionType::Monthly,
                dec!(50000),
                date(2024, 1, 5),
                MemberId::new(1),
                ContributionStatus::Paid,
            )
            .unwrap(),
        )
        .with_contribution(
            ContributionRecord::new(
                ContributionId::new(2),
                ContributionType::Baptism,
                dec!(20000),
                date(2024, 1, 20),
                MemberId::new(2),
                ContributionStatus::Unpaid,
            )
            .unwrap()
            .with_officiant("Fr. Diallo"),
        )
        .with_contribution(
            ContributionRecord::new(
                ContributionId::new(3),
                ContributionType::SpecialCase,
                dec!(15000),
                date(2024, 2, 2),
                MemberId::new(1),
                ContributionStatus::Partial,
            )
            .unwrap()
            .with_officiant("Abbé Camara"),
        )
}

fn app() -> Router {
    create_router(AppState::new(Arc::new(source()), ReportService::default()))
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn json(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

fn disposition(response: &Response) -> &str {
    response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Health and listings
// ============================================================================

#[tokio::test]
async fn test_health() {
    let response = get(app(), "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_list_contributions_filtered() {
    let response = get(app(), "/api/v1/contributions?type=baptism").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["member_name"], "Fatoumata Sow");

    let legacy = json(get(app(), "/api/v1/contributions?statut=paye").await).await;
    assert_eq!(legacy.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_contributions_newest_first() {
    let body = json(get(app(), "/api/v1/contributions").await).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[tokio::test]
async fn test_invalid_date_is_a_json_validation_error() {
    let response = get(app(), "/api/v1/contributions?date_start=20-01-2024").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("date_start"));
}

#[tokio::test]
async fn test_celebrants_only_from_sacraments() {
    let body = json(get(app(), "/api/v1/contributions/celebrants").await).await;
    assert_eq!(body, serde_json::json!(["Fr. Diallo"]));
}

// ============================================================================
// Statistics
// ============================================================================

#[tokio::test]
async fn test_summary_for_january() {
    let response = get(
        app(),
        "/api/v1/contributions/stats/summary?date_debut=2024-01-01&date_fin=2024-01-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["total_paid_amount"], "50000");
    assert_eq!(body["total_unpaid_amount"], "20000");
    assert_eq!(body["total_partial_amount"], "0");
}

#[tokio::test]
async fn test_by_type_sorted_by_identifier() {
    let body = json(get(app(), "/api/v1/contributions/stats/by-type").await).await;
    let types: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["baptism", "monthly", "special_case"]);
}

#[tokio::test]
async fn test_unknown_period_rejected() {
    let response = get(app(), "/api/v1/contributions/stats/summary?period=week").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Reports
// ============================================================================

#[tokio::test]
async fn test_monthly_report_download() {
    let response = get(
        app(),
        "/api/v1/reports/monthly?date_start=2024-01-01&date_fin=2024-01-31",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        disposition(&response),
        "attachment; filename=rapport_mensuel_2024-01-01_2024-01-31.pdf"
    );

    let pdf = bytes(response).await;
    assert!(pdf.starts_with(b"%PDF"));
    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[tokio::test]
async fn test_monthly_report_requires_dates() {
    let response = get(app(), "/api/v1/reports/monthly?date_start=2024-01-01").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_member_report() {
    let response = get(app(), "/api/v1/reports/member/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(disposition(&response).starts_with("attachment; filename=rapport_membre_1_"));

    let missing = get(app(), "/api/v1/reports/member/42").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(missing).await["error"], "NOT_FOUND");

    let malformed = get(app(), "/api/v1/reports/member/abc").await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_event_report_accepts_legacy_type() {
    let response = get(app(), "/api/v1/reports/event/bapteme").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(disposition(&response).starts_with("attachment; filename=rapport_baptism_"));

    let unknown = get(app(), "/api/v1/reports/event/funeral").await;
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_members_report() {
    let response = get(app(), "/api/v1/reports/members?status=inactive").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(disposition(&response).starts_with("attachment; filename=liste_membres_"));

    let bogus = get(app(), "/api/v1/reports/members?status=retired").await;
    assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contributions_report_is_archived() {
    let dir = tempfile::tempdir().unwrap();
    let archive = DocumentStore::from_provider(&ArchiveProvider::local_fs(dir.path())).unwrap();
    let state =
        AppState::new(Arc::new(source()), ReportService::default()).with_archive(archive);

    let response = get(
        create_router(state),
        "/api/v1/reports/contributions?type=monthly",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let served = bytes(response).await;

    let stored: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(stored.len(), 1);
    let name = stored[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("liste_cotisations_"));
    assert_eq!(std::fs::read(&stored[0]).unwrap(), served);
}
