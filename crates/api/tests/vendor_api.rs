//! Integration tests for vendor listing, scoring, history, and benchmarking.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, seed_fixture};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_vendors_returns_seeded_rows(pool: PgPool) {
    seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let vendors = json["data"].as_array().unwrap();
    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors[0]["name"], "Alpha Screening");
    assert_eq!(vendors[1]["name"], "Beta Data");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_vendors_rejects_out_of_range_limit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors/?limit=1001").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_score_computes_composite_and_submetrics(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/vendors/{}/score", fixture.vendor_alpha)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let metrics = &json["data"];
    assert_eq!(metrics["pii_completeness"], 75.0);
    assert_eq!(metrics["disposition_accuracy"], 75.0);
    assert_eq!(metrics["avg_freshness_days"], 5.0);
    assert_eq!(metrics["geographic_coverage"], 90.0);
    assert_eq!(metrics["quality_score"], 80.5);
    assert_eq!(metrics["total_records"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_score_refreshes_the_cached_score(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    // Skew the cache so the refresh is observable.
    sqlx::query("UPDATE vendors SET quality_score = 1.0 WHERE id = $1")
        .bind(fixture.vendor_alpha)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/vendors/{}/score", fixture.vendor_alpha)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cached: f64 = sqlx::query_scalar("SELECT quality_score FROM vendors WHERE id = $1")
        .bind(fixture.vendor_alpha)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(cached, 80.5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn vendor_with_no_records_scores_all_zeros(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/vendors/{}/score", fixture.vendor_beta)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let metrics = &json["data"];
    assert_eq!(metrics["quality_score"], 0.0);
    assert_eq!(metrics["pii_completeness"], 0.0);
    assert_eq!(metrics["total_records"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_vendor_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors/999999/score").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Snapshots and history
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn snapshot_then_history_round_trips(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_empty(
        app,
        &format!("/api/v1/vendors/{}/snapshot", fixture.vendor_alpha),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let snapshot = body_json(response).await;
    assert_eq!(snapshot["data"]["calculated_score"], 80.5);

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vendors/{}/history?days=30", fixture.vendor_alpha),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["vendor_name"], "Alpha Screening");
    assert_eq!(json["data"]["period_days"], 30);
    let history = json["data"]["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["quality_score"], 80.5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_rejects_out_of_range_window(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vendors/{}/history?days=366", fixture.vendor_alpha),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Jurisdiction performance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn jurisdiction_rows_keep_zero_record_jurisdictions(pool: PgPool) {
    let fixture = seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        &format!("/api/v1/vendors/{}/jurisdictions", fixture.vendor_alpha),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"]["jurisdictions"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let cook = rows
        .iter()
        .find(|r| r["jurisdiction"] == "Cook County")
        .unwrap();
    assert_eq!(cook["record_count"], 4);
    assert_eq!(cook["pii_completeness_rate"], 75.0);
    assert_eq!(cook["disposition_accuracy_rate"], 75.0);
    // Taken from the coverage row, not recomputed from records.
    assert_eq!(cook["coverage_percentage"], 95.0);
    assert_eq!(cook["avg_turnaround_hours"], 24.0);

    // Coverage configured but zero matching records: counts and rates are 0.
    let harris = rows
        .iter()
        .find(|r| r["jurisdiction"] == "Harris County")
        .unwrap();
    assert_eq!(harris["record_count"], 0);
    assert_eq!(harris["pii_completeness_rate"], 0.0);
    assert_eq!(harris["disposition_accuracy_rate"], 0.0);
    assert_eq!(harris["coverage_percentage"], 85.0);
}

// ---------------------------------------------------------------------------
// Benchmark
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn benchmark_ranks_by_quality_descending(pool: PgPool) {
    seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors/benchmark").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let vendors = json["data"]["vendors"].as_array().unwrap();
    assert_eq!(vendors.len(), 2);

    // Alpha (80.5) outranks Beta (0.0); output is non-increasing.
    assert_eq!(vendors[0]["vendor_name"], "Alpha Screening");
    assert_eq!(vendors[0]["quality_score"], 80.5);
    assert_eq!(vendors[0]["value_index"], 8.05);
    assert_eq!(vendors[1]["quality_score"], 0.0);

    let summary = &json["data"]["summary"];
    assert_eq!(summary["total_vendors"], 2);
    assert_eq!(summary["avg_quality_score"], 40.25);
    assert_eq!(summary["avg_cost_per_record"], 7.5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn summary_uses_cached_scores(pool: PgPool) {
    seed_fixture(&pool).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/vendors/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_vendors"], 2);
    // Cached scores: 80.5 and 0.0 -> 40.3 after 1-decimal rounding.
    assert_eq!(json["data"]["avg_quality_score"], 40.3);
    assert_eq!(json["data"]["avg_coverage"], 85.0);
}
