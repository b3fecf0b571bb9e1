//! Sample-data seeding.
//!
//! Populates an empty database with four vendors of distinct quality
//! profiles, eight jurisdictions, per-pair coverage, 500 delivered records
//! with per-vendor quality probabilities, one metric snapshot per vendor,
//! default alert configurations, and a few sample alerts and schema changes.
//! Runs in a single transaction; a non-empty `vendors` table skips seeding.

use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::PgPool;
use veriscore_core::record::{DispositionType, PiiStatus, RecordQuality};
use veriscore_core::scoring::calculate_quality_score;
use veriscore_core::types::DbId;

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Michael", "Sarah", "Robert", "Emily", "David", "Jessica", "James", "Ashley",
];
const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

const RECORD_COUNT: usize = 500;

struct VendorProfile {
    name: &'static str,
    description: &'static str,
    cost_per_record: f64,
    coverage_percentage: f64,
    /// Per-jurisdiction coverage percentages, one per seeded jurisdiction.
    jurisdiction_coverage: [f64; 8],
    p_has_dob: f64,
    p_has_ssn: f64,
    p_verified: f64,
}

const PROFILES: [VendorProfile; 4] = [
    VendorProfile {
        name: "VendorA",
        description: "Premium provider with highest quality and coverage",
        cost_per_record: 12.00,
        coverage_percentage: 98.0,
        jurisdiction_coverage: [98.0, 97.0, 99.0, 96.0, 98.0, 97.0, 99.0, 98.0],
        p_has_dob: 0.95,
        p_has_ssn: 0.94,
        p_verified: 0.96,
    },
    VendorProfile {
        name: "VendorB",
        description: "Balanced provider with good quality and reasonable cost",
        cost_per_record: 8.00,
        coverage_percentage: 92.0,
        jurisdiction_coverage: [92.0, 90.0, 94.0, 88.0, 91.0, 89.0, 93.0, 90.0],
        p_has_dob: 0.85,
        p_has_ssn: 0.84,
        p_verified: 0.90,
    },
    VendorProfile {
        name: "VendorC",
        description: "Budget provider with lower cost but reduced quality",
        cost_per_record: 5.00,
        coverage_percentage: 85.0,
        jurisdiction_coverage: [85.0, 82.0, 87.0, 80.0, 83.0, 81.0, 86.0, 84.0],
        p_has_dob: 0.75,
        p_has_ssn: 0.74,
        p_verified: 0.80,
    },
    VendorProfile {
        name: "VendorD",
        description: "California specialist with excellent regional coverage",
        cost_per_record: 10.00,
        coverage_percentage: 75.0,
        jurisdiction_coverage: [0.0, 98.0, 0.0, 0.0, 0.0, 0.0, 0.0, 95.0],
        p_has_dob: 0.90,
        p_has_ssn: 0.89,
        p_verified: 0.93,
    },
];

const JURISDICTIONS: [(&str, &str, &str); 8] = [
    ("Cook County", "IL", "Cook"),
    ("Los Angeles County", "CA", "Los Angeles"),
    ("New York City", "NY", "New York"),
    ("Miami-Dade County", "FL", "Miami-Dade"),
    ("Harris County", "TX", "Harris"),
    ("Maricopa County", "AZ", "Maricopa"),
    ("King County", "WA", "King"),
    ("Orange County", "CA", "Orange"),
];

/// Seed sample data if the vendors table is empty.
///
/// Returns `true` when seeding actually ran.
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let vendor_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
        .fetch_one(pool)
        .await?;
    if vendor_count > 0 {
        return Ok(false);
    }

    let mut rng = rand::rng();
    let mut tx = pool.begin().await?;

    // -- Jurisdictions --
    let mut jurisdiction_ids: Vec<DbId> = Vec::with_capacity(JURISDICTIONS.len());
    for (name, state, county) in JURISDICTIONS {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO jurisdictions (name, state, county) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(state)
        .bind(county)
        .fetch_one(&mut *tx)
        .await?;
        jurisdiction_ids.push(id);
    }

    // -- Vendors and their coverage footprints --
    let mut vendor_ids: Vec<DbId> = Vec::with_capacity(PROFILES.len());
    for profile in &PROFILES {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO vendors (name, description, cost_per_record, coverage_percentage) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(profile.name)
        .bind(profile.description)
        .bind(profile.cost_per_record)
        .bind(profile.coverage_percentage)
        .fetch_one(&mut *tx)
        .await?;
        vendor_ids.push(id);

        for (jurisdiction_idx, &jurisdiction_id) in jurisdiction_ids.iter().enumerate() {
            sqlx::query(
                "INSERT INTO vendor_coverage \
                    (vendor_id, jurisdiction_id, coverage_percentage, avg_turnaround_hours) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(jurisdiction_id)
            .bind(profile.jurisdiction_coverage[jurisdiction_idx])
            .bind(rng.random_range(24.0..72.0))
            .execute(&mut *tx)
            .await?;
        }
    }

    // -- Delivered records, rotating through vendors and jurisdictions --
    let mut per_vendor_quality: Vec<Vec<RecordQuality>> = vec![Vec::new(); PROFILES.len()];
    let now = Utc::now();

    for i in 0..RECORD_COUNT {
        let vendor_idx = i % PROFILES.len();
        let profile = &PROFILES[vendor_idx];
        let vendor_id = vendor_ids[vendor_idx];
        let jurisdiction_id = jurisdiction_ids[i % jurisdiction_ids.len()];

        let has_dob = rng.random::<f64>() < profile.p_has_dob;
        let has_ssn = rng.random::<f64>() < profile.p_has_ssn;
        let has_full_name = rng.random::<f64>() < 0.98;
        let pii_status = PiiStatus::from_flags(has_dob, has_ssn, has_full_name);
        let disposition_verified = rng.random::<f64>() < profile.p_verified;

        let filing_date = now - Duration::days(rng.random_range(1..=365));
        let court_filing_date = filing_date + Duration::days(rng.random_range(0..=30));
        let disposition_date = court_filing_date + Duration::days(rng.random_range(30..=180));
        let vendor_delivery_date = court_filing_date + Duration::hours(rng.random_range(12..=96));
        let turnaround_hours =
            (vendor_delivery_date - court_filing_date).num_seconds() as f64 / 3600.0;
        let freshness_days = (vendor_delivery_date - court_filing_date).num_days() as f64;

        let defendant_name = format!(
            "{} {}",
            FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())],
            LAST_NAMES[rng.random_range(0..LAST_NAMES.len())],
        );
        let date_of_birth = has_dob.then(|| now - Duration::days(rng.random_range(6_570..=29_200)));
        let ssn = has_ssn.then(|| {
            format!(
                "{}-{}-{}",
                rng.random_range(100..=999),
                rng.random_range(10..=99),
                rng.random_range(1000..=9999),
            )
        });
        let disposition_type =
            DispositionType::ALL[rng.random_range(0..DispositionType::ALL.len())];

        sqlx::query(
            "INSERT INTO criminal_records \
                (vendor_id, jurisdiction_id, case_number, defendant_name, date_of_birth, ssn, \
                 disposition_type, disposition_date, filing_date, court_filing_date, \
                 pii_status, has_dob, has_ssn, has_full_name, disposition_verified, \
                 vendor_delivery_date, turnaround_hours, freshness_days) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     $11, $12, $13, $14, $15, $16, $17, $18)",
        )
        .bind(vendor_id)
        .bind(jurisdiction_id)
        .bind(format!("CASE-{}", rng.random_range(100_000..=999_999)))
        .bind(defendant_name)
        .bind(date_of_birth)
        .bind(ssn)
        .bind(disposition_type.as_str())
        .bind(disposition_date)
        .bind(filing_date)
        .bind(court_filing_date)
        .bind(pii_status.as_str())
        .bind(has_dob)
        .bind(has_ssn)
        .bind(has_full_name)
        .bind(disposition_verified)
        .bind(vendor_delivery_date)
        .bind(turnaround_hours)
        .bind(freshness_days)
        .execute(&mut *tx)
        .await?;

        per_vendor_quality[vendor_idx].push(RecordQuality {
            pii_status,
            disposition_verified,
            freshness_days,
            turnaround_hours,
        });
    }

    // -- Initial metric snapshots and cached composite scores --
    for (vendor_idx, profile) in PROFILES.iter().enumerate() {
        let metrics = calculate_quality_score(
            &per_vendor_quality[vendor_idx],
            profile.coverage_percentage,
        );

        sqlx::query(
            "INSERT INTO vendor_metrics \
                (vendor_id, pii_completeness, disposition_accuracy, \
                 avg_freshness_days, geographic_coverage, calculated_score) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(vendor_ids[vendor_idx])
        .bind(metrics.pii_completeness)
        .bind(metrics.disposition_accuracy)
        .bind(metrics.avg_freshness_days)
        .bind(metrics.geographic_coverage)
        .bind(metrics.quality_score)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE vendors SET quality_score = $2 WHERE id = $1")
            .bind(vendor_ids[vendor_idx])
            .bind(metrics.quality_score)
            .execute(&mut *tx)
            .await?;
    }

    // -- Default alert configurations, plus sample alerts for the budget
    //    vendor so the dashboard has something to show --
    let default_watches: [(&str, f64, &str, &str); 3] = [
        ("pii_completeness", 90.0, "high", "Pii Completeness Alert"),
        ("disposition_accuracy", 95.0, "high", "Disposition Accuracy Alert"),
        ("turnaround_time", 72.0, "medium", "Turnaround Time Alert"),
    ];

    for (vendor_idx, profile) in PROFILES.iter().enumerate() {
        for (alert_type, threshold, severity, title) in default_watches {
            sqlx::query(
                "INSERT INTO alert_configurations (vendor_id, alert_type, threshold_value) \
                 VALUES ($1, $2, $3)",
            )
            .bind(vendor_ids[vendor_idx])
            .bind(alert_type)
            .bind(threshold)
            .execute(&mut *tx)
            .await?;

            if profile.name == "VendorC" && rng.random::<f64>() < 0.7 {
                let current_value = threshold - rng.random_range(5.0..15.0);
                sqlx::query(
                    "INSERT INTO alerts \
                        (vendor_id, alert_type, severity, title, description, \
                         current_value, threshold_value, variance_percentage) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
                )
                .bind(vendor_ids[vendor_idx])
                .bind(alert_type)
                .bind(severity)
                .bind(title)
                .bind(format!(
                    "Vendor {} has fallen below threshold for {alert_type}",
                    profile.name
                ))
                .bind(current_value)
                .bind(threshold)
                .bind(threshold - current_value)
                .execute(&mut *tx)
                .await?;
            }
        }
    }

    // -- Sample schema changes --
    let sample_changes: [(usize, &str, &str, &str, &str, i32); 3] = [
        (
            2,
            "Updated misdemeanor classification logic",
            "disposition_type",
            "old_misdemeanor",
            "new_misdemeanor",
            150,
        ),
        (
            1,
            "Enhanced PII data collection",
            "pii_fields",
            "name_only",
            "name_dob_ssn",
            75,
        ),
        (
            0,
            "Improved court filing date parsing",
            "filing_date",
            "mm/dd/yyyy",
            "iso_format",
            200,
        ),
    ];

    for (vendor_idx, description, field, old_value, new_value, affected) in sample_changes {
        sqlx::query(
            "INSERT INTO schema_changes \
                (vendor_id, change_description, field_affected, old_value, new_value, \
                 records_affected, change_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(vendor_ids[vendor_idx])
        .bind(description)
        .bind(field)
        .bind(old_value)
        .bind(new_value)
        .bind(affected)
        .bind(now - Duration::days(rng.random_range(1..=30)))
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        vendors = PROFILES.len(),
        jurisdictions = JURISDICTIONS.len(),
        records = RECORD_COUNT,
        "Sample data seeded",
    );

    Ok(true)
}
