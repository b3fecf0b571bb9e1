//! Integration tests for the repository layer against a real database:
//! scoring projections, trailing-window aggregations, alert lifecycle
//! stamping, configuration replacement, and seeding.

use sqlx::PgPool;
use veriscore_core::record::PiiStatus;
use veriscore_db::models::alert::{AlertConfigInput, NewAlert};
use veriscore_db::repositories::{AlertRepo, RecordRepo, VendorRepo};
use veriscore_db::seed;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert_vendor(pool: &PgPool, name: &str, cost: f64, coverage: f64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO vendors (name, cost_per_record, coverage_percentage) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(cost)
    .bind(coverage)
    .fetch_one(pool)
    .await
    .expect("insert vendor")
}

async fn insert_jurisdiction(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO jurisdictions (name, state, county) \
         VALUES ($1, 'IL', 'Test') RETURNING id",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("insert jurisdiction")
}

async fn insert_record(
    pool: &PgPool,
    vendor_id: i64,
    jurisdiction_id: i64,
    pii_status: &str,
    verified: bool,
    delivered_days_ago: i32,
) {
    sqlx::query(
        "INSERT INTO criminal_records \
            (vendor_id, jurisdiction_id, case_number, disposition_type, court_filing_date, \
             pii_status, disposition_verified, vendor_delivery_date, \
             turnaround_hours, freshness_days) \
         VALUES ($1, $2, 'CASE-1', 'felony', NOW() - make_interval(days => $3 + 2), \
                 $4, $5, NOW() - make_interval(days => $3), 48.0, 2.0)",
    )
    .bind(vendor_id)
    .bind(jurisdiction_id)
    .bind(delivered_days_ago)
    .bind(pii_status)
    .bind(verified)
    .execute(pool)
    .await
    .expect("insert record");
}

// ---------------------------------------------------------------------------
// Scoring projections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn quality_rows_map_db_strings_to_statuses(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;
    let jurisdiction = insert_jurisdiction(&pool, "J").await;
    insert_record(&pool, vendor, jurisdiction, "complete", true, 1).await;
    insert_record(&pool, vendor, jurisdiction, "incomplete", false, 1).await;
    insert_record(&pool, vendor, jurisdiction, "missing", true, 1).await;

    let rows = RecordRepo::quality_rows(&pool, vendor).await.unwrap();
    assert_eq!(rows.len(), 3);

    let complete = rows
        .iter()
        .filter(|r| r.pii_status == PiiStatus::Complete)
        .count();
    assert_eq!(complete, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn recent_turnaround_is_none_outside_the_window(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;
    let jurisdiction = insert_jurisdiction(&pool, "J").await;

    // Delivered 30 days ago: outside the 7-day window.
    insert_record(&pool, vendor, jurisdiction, "complete", true, 30).await;
    let avg = RecordRepo::recent_avg_turnaround(&pool, vendor, 7)
        .await
        .unwrap();
    assert_eq!(avg, None);

    // A fresh delivery brings the average back.
    insert_record(&pool, vendor, jurisdiction, "complete", true, 1).await;
    let avg = RecordRepo::recent_avg_turnaround(&pool, vendor, 7)
        .await
        .unwrap();
    assert_eq!(avg, Some(48.0));
}

#[sqlx::test(migrations = "./migrations")]
async fn jurisdiction_performance_keeps_empty_jurisdictions(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;
    let with_records = insert_jurisdiction(&pool, "Covered").await;
    let without_records = insert_jurisdiction(&pool, "Empty").await;

    for jurisdiction in [with_records, without_records] {
        sqlx::query(
            "INSERT INTO vendor_coverage \
                (vendor_id, jurisdiction_id, coverage_percentage, avg_turnaround_hours) \
             VALUES ($1, $2, 90.0, 24.0)",
        )
        .bind(vendor)
        .bind(jurisdiction)
        .execute(&pool)
        .await
        .unwrap();
    }
    insert_record(&pool, vendor, with_records, "complete", true, 1).await;

    let rows = RecordRepo::jurisdiction_performance(&pool, vendor)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    let empty = rows.iter().find(|r| r.jurisdiction == "Empty").unwrap();
    assert_eq!(empty.record_count, 0);
    assert_eq!(empty.pii_completeness_rate, 0.0);
    assert_eq!(empty.coverage_percentage, 90.0);
}

// ---------------------------------------------------------------------------
// Vendor cache update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn update_quality_score_stamps_updated_at(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;
    VendorRepo::update_quality_score(&pool, vendor, 88.25)
        .await
        .unwrap();

    let row = VendorRepo::find_by_id(&pool, vendor).await.unwrap().unwrap();
    assert_eq!(row.quality_score, 88.25);
    assert!(row.updated_at.is_some());
}

// ---------------------------------------------------------------------------
// Alert lifecycle and configuration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn alert_transitions_restamp_without_guards(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;
    let alert = AlertRepo::insert(
        &pool,
        &NewAlert {
            vendor_id: vendor,
            alert_type: "quality_drop".to_string(),
            severity: "high".to_string(),
            title: "Quality Score Drop Detected".to_string(),
            description: "Quality score (70.0) is below threshold (85)".to_string(),
            current_value: 70.0,
            threshold_value: 85.0,
            variance_percentage: 15.0,
        },
    )
    .await
    .unwrap();
    assert_eq!(alert.status, "active");

    // Resolve straight from active: allowed.
    let resolved = AlertRepo::resolve(&pool, alert.id).await.unwrap().unwrap();
    assert_eq!(resolved.status, "resolved");
    let first_stamp = resolved.resolved_at.unwrap();

    // Resolving again simply restamps.
    let resolved_again = AlertRepo::resolve(&pool, alert.id).await.unwrap().unwrap();
    assert!(resolved_again.resolved_at.unwrap() >= first_stamp);

    // Unknown ids report as missing, not as errors.
    assert!(AlertRepo::acknowledge(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn replace_configs_is_wholesale(pool: PgPool) {
    let vendor = insert_vendor(&pool, "V", 10.0, 90.0).await;

    AlertRepo::replace_configs(
        &pool,
        vendor,
        &[
            AlertConfigInput {
                alert_type: "pii_completeness".to_string(),
                threshold_value: 90.0,
                is_active: true,
            },
            AlertConfigInput {
                alert_type: "turnaround_time".to_string(),
                threshold_value: 72.0,
                is_active: false,
            },
        ],
    )
    .await
    .unwrap();

    AlertRepo::replace_configs(
        &pool,
        vendor,
        &[AlertConfigInput {
            alert_type: "quality_drop".to_string(),
            threshold_value: 80.0,
            is_active: true,
        }],
    )
    .await
    .unwrap();

    let configs = AlertRepo::configs_for_vendor(&pool, vendor, false).await.unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].alert_type, "quality_drop");

    let active_only = AlertRepo::configs_for_vendor(&pool, vendor, true).await.unwrap();
    assert_eq!(active_only.len(), 1);
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn seed_populates_an_empty_database_once(pool: PgPool) {
    assert!(seed::seed_if_empty(&pool).await.unwrap());

    let vendors: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(vendors, 4);

    let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM criminal_records")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(records, 500);

    // Cached scores were computed from the generated records.
    let zero_scores: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM vendors WHERE quality_score <= 0")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(zero_scores, 0);

    // Second call is a no-op.
    assert!(!seed::seed_if_empty(&pool).await.unwrap());
}
