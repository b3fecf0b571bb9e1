//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router (same middleware stack as production) via
//! `tower::ServiceExt::oneshot`, with no TCP listener involved.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use veriscore_api::config::ServerConfig;
use veriscore_api::router::build_app_router;
use veriscore_api::sessions::SessionStore;
use veriscore_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::new(SessionStore::new()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the router.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request executes")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request executes")
}

/// Send a POST request with an empty body.
pub async fn post_empty(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request executes")
}

/// Send a POST request with a single-file multipart body.
pub async fn post_multipart_file(
    app: Router,
    uri: &str,
    filename: &str,
    contents: &str,
) -> Response {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );

    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .expect("request builds"),
    )
    .await
    .expect("request executes")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

// ---------------------------------------------------------------------------
// Deterministic fixture
// ---------------------------------------------------------------------------

/// Ids of the rows inserted by [`seed_fixture`].
pub struct Fixture {
    pub vendor_alpha: i64,
    pub vendor_beta: i64,
    pub jurisdiction_cook: i64,
    pub jurisdiction_harris: i64,
    pub alert_id: i64,
    pub schema_change_id: i64,
}

/// Insert a small deterministic data set.
///
/// Vendor Alpha has four records in Cook County (3 of 4 PII-complete, 3 of 4
/// verified, freshness 2/4/6/8 days, turnaround 48h each, delivered
/// yesterday) and coverage rows in both jurisdictions. Its expected metrics:
///
/// ```text
/// pii_completeness      = 75.0
/// disposition_accuracy  = 75.0
/// avg_freshness_days    = 5.0
/// quality_score         = 75*0.4 + 75*0.3 + 95*0.2 + 90*0.1 = 80.5
/// ```
///
/// Vendor Beta has no records (all-zero metrics path).
pub async fn seed_fixture(pool: &PgPool) -> Fixture {
    let jurisdiction_cook: i64 = sqlx::query_scalar(
        "INSERT INTO jurisdictions (name, state, county) \
         VALUES ('Cook County', 'IL', 'Cook') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("insert jurisdiction");

    let jurisdiction_harris: i64 = sqlx::query_scalar(
        "INSERT INTO jurisdictions (name, state, county) \
         VALUES ('Harris County', 'TX', 'Harris') RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("insert jurisdiction");

    let vendor_alpha: i64 = sqlx::query_scalar(
        "INSERT INTO vendors \
            (name, description, cost_per_record, quality_score, coverage_percentage) \
         VALUES ('Alpha Screening', 'Full-service provider', 10.0, 80.5, 90.0) \
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("insert vendor");

    let vendor_beta: i64 = sqlx::query_scalar(
        "INSERT INTO vendors \
            (name, description, cost_per_record, quality_score, coverage_percentage) \
         VALUES ('Beta Data', 'Budget provider', 5.0, 0.0, 80.0) \
         RETURNING id",
    )
    .fetch_one(pool)
    .await
    .expect("insert vendor");

    for (vendor_id, jurisdiction_id, coverage, turnaround) in [
        (vendor_alpha, jurisdiction_cook, 95.0, 24.0),
        (vendor_alpha, jurisdiction_harris, 85.0, 48.0),
        (vendor_beta, jurisdiction_cook, 80.0, 36.0),
    ] {
        sqlx::query(
            "INSERT INTO vendor_coverage \
                (vendor_id, jurisdiction_id, coverage_percentage, avg_turnaround_hours) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(vendor_id)
        .bind(jurisdiction_id)
        .bind(coverage)
        .bind(turnaround)
        .execute(pool)
        .await
        .expect("insert coverage");
    }

    // 4 records for Alpha in Cook County, delivered yesterday.
    let records = [
        ("complete", true, 2.0),
        ("complete", true, 4.0),
        ("incomplete", true, 6.0),
        ("complete", false, 8.0),
    ];
    for (i, (pii_status, verified, freshness)) in records.into_iter().enumerate() {
        sqlx::query(
            "INSERT INTO criminal_records \
                (vendor_id, jurisdiction_id, case_number, defendant_name, disposition_type, \
                 court_filing_date, pii_status, has_dob, has_ssn, has_full_name, \
                 disposition_verified, vendor_delivery_date, turnaround_hours, freshness_days) \
             VALUES ($1, $2, $3, 'Test Person', 'felony', \
                     NOW() - INTERVAL '3 days', $4, TRUE, TRUE, TRUE, \
                     $5, NOW() - INTERVAL '1 day', 48.0, $6)",
        )
        .bind(vendor_alpha)
        .bind(jurisdiction_cook)
        .bind(format!("CASE-{i}"))
        .bind(pii_status)
        .bind(verified)
        .bind(freshness)
        .execute(pool)
        .await
        .expect("insert record");
    }

    // Threshold watches for Alpha: PII breaches (75 < 90), turnaround does
    // not (48 < 100).
    for (alert_type, threshold) in [("pii_completeness", 90.0), ("turnaround_time", 100.0)] {
        sqlx::query(
            "INSERT INTO alert_configurations (vendor_id, alert_type, threshold_value) \
             VALUES ($1, $2, $3)",
        )
        .bind(vendor_alpha)
        .bind(alert_type)
        .bind(threshold)
        .execute(pool)
        .await
        .expect("insert config");
    }

    let alert_id: i64 = sqlx::query_scalar(
        "INSERT INTO alerts \
            (vendor_id, alert_type, severity, title, description, \
             current_value, threshold_value, variance_percentage) \
         VALUES ($1, 'pii_completeness', 'high', 'PII Completeness Below Threshold', \
                 'PII completeness (75.0%) is below threshold (90%)', 75.0, 90.0, 15.0) \
         RETURNING id",
    )
    .bind(vendor_alpha)
    .fetch_one(pool)
    .await
    .expect("insert alert");

    let schema_change_id: i64 = sqlx::query_scalar(
        "INSERT INTO schema_changes \
            (vendor_id, change_description, field_affected, old_value, new_value, \
             records_affected, change_date) \
         VALUES ($1, 'Updated disposition codes', 'disposition_type', 'v1', 'v2', \
                 150, NOW() - INTERVAL '5 days') \
         RETURNING id",
    )
    .bind(vendor_alpha)
    .fetch_one(pool)
    .await
    .expect("insert schema change");

    Fixture {
        vendor_alpha,
        vendor_beta,
        jurisdiction_cook,
        jurisdiction_harris,
        alert_id,
        schema_change_id,
    }
}
