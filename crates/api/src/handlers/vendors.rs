//! Handlers for vendor listing, scoring, history, and benchmarking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use veriscore_core::analysis::JurisdictionPerformance;
use veriscore_core::scoring::{calculate_value_index, QualityMetrics};
use veriscore_core::stats::mean;
use veriscore_core::types::{round1, round2, DbId, Timestamp};
use veriscore_core::validation;
use veriscore_db::models::record::TrendPoint;
use veriscore_db::models::vendor::Vendor;
use veriscore_db::repositories::{MetricsRepo, RecordRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{compute_vendor_metrics, require_vendor};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub active_only: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
}

// ---------------------------------------------------------------------------
// GET /vendors -- list with optional filtering
// ---------------------------------------------------------------------------

/// List vendors with pagination, active ones by default.
pub async fn list_vendors(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(100);
    validation::validate_limit(limit)?;
    let skip = params.skip.unwrap_or(0);
    if skip < 0 {
        return Err(AppError::BadRequest("skip must be non-negative".into()));
    }

    let vendors =
        VendorRepo::list(&state.pool, skip, limit, params.active_only.unwrap_or(true)).await?;
    Ok(Json(DataResponse { data: vendors }))
}

// ---------------------------------------------------------------------------
// GET /vendors/summary -- population summary
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VendorSummaryEntry {
    pub id: DbId,
    pub name: String,
    pub quality_score: f64,
    pub coverage_percentage: f64,
    pub cost_per_record: f64,
}

#[derive(Debug, Serialize)]
pub struct VendorsSummary {
    pub total_vendors: usize,
    pub avg_quality_score: f64,
    pub avg_coverage: f64,
    pub vendors: Vec<VendorSummaryEntry>,
}

/// Summary statistics over all active vendors (cached scores, no recompute).
pub async fn vendors_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list_active(&state.pool).await?;

    let quality: Vec<f64> = vendors.iter().map(|v| v.quality_score).collect();
    let coverage: Vec<f64> = vendors.iter().map(|v| v.coverage_percentage).collect();

    let summary = VendorsSummary {
        total_vendors: vendors.len(),
        avg_quality_score: round1(mean(&quality)),
        avg_coverage: round1(mean(&coverage)),
        vendors: vendors
            .into_iter()
            .map(|v| VendorSummaryEntry {
                id: v.id,
                name: v.name,
                quality_score: v.quality_score,
                coverage_percentage: v.coverage_percentage,
                cost_per_record: v.cost_per_record,
            })
            .collect(),
    };

    Ok(Json(DataResponse { data: summary }))
}

// ---------------------------------------------------------------------------
// GET /vendors/{id} -- full detail
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VendorDetail {
    pub vendor: Vendor,
    pub metrics: QualityMetrics,
    pub jurisdiction_performance: Vec<JurisdictionPerformance>,
    pub quality_trends: Vec<TrendPoint>,
}

/// Detailed vendor view: entity, fresh metrics, per-jurisdiction rows, and
/// the trailing-90-day trend.
pub async fn vendor_detail(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = require_vendor(&state.pool, id).await?;
    let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;
    let jurisdiction_performance = RecordRepo::jurisdiction_performance(&state.pool, id).await?;
    let quality_trends = RecordRepo::daily_trends(&state.pool, id, 90).await?;

    Ok(Json(DataResponse {
        data: VendorDetail {
            vendor,
            metrics,
            jurisdiction_performance,
            quality_trends,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /vendors/{id}/score -- compute and cache
// ---------------------------------------------------------------------------

/// Compute current quality metrics and refresh the vendor's cached
/// composite score.
pub async fn vendor_score(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = require_vendor(&state.pool, id).await?;
    let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;

    // Cache-update step: the quality_drop alert reads this column.
    VendorRepo::update_quality_score(&state.pool, id, metrics.quality_score).await?;

    Ok(Json(DataResponse { data: metrics }))
}

// ---------------------------------------------------------------------------
// POST /vendors/{id}/snapshot -- append a metric snapshot
// ---------------------------------------------------------------------------

/// Compute current metrics, refresh the cache, and append an immutable
/// snapshot to the trend history.
pub async fn record_snapshot(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = require_vendor(&state.pool, id).await?;
    let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;

    VendorRepo::update_quality_score(&state.pool, id, metrics.quality_score).await?;
    let snapshot = MetricsRepo::insert_snapshot(&state.pool, id, &metrics).await?;

    tracing::info!(
        vendor_id = id,
        quality_score = metrics.quality_score,
        "Vendor metric snapshot recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}

// ---------------------------------------------------------------------------
// GET /vendors/{id}/history -- snapshot history
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HistoryPoint {
    pub date: Timestamp,
    pub quality_score: f64,
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_freshness_days: f64,
    pub geographic_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct VendorHistory {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub period_days: i64,
    pub history: Vec<HistoryPoint>,
}

/// Metric snapshots within the trailing window, newest first.
pub async fn vendor_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<WindowQuery>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(30);
    validation::validate_window_days(days)?;

    let vendor = require_vendor(&state.pool, id).await?;
    let snapshots = MetricsRepo::history(&state.pool, id, days as i32).await?;

    Ok(Json(DataResponse {
        data: VendorHistory {
            vendor_id: id,
            vendor_name: vendor.name,
            period_days: days,
            history: snapshots
                .into_iter()
                .map(|s| HistoryPoint {
                    date: s.recorded_at,
                    quality_score: s.calculated_score,
                    pii_completeness: s.pii_completeness,
                    disposition_accuracy: s.disposition_accuracy,
                    avg_freshness_days: s.avg_freshness_days,
                    geographic_coverage: s.geographic_coverage,
                })
                .collect(),
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /vendors/{id}/jurisdictions -- per-jurisdiction performance
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VendorJurisdictions {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub jurisdictions: Vec<JurisdictionPerformance>,
}

pub async fn vendor_jurisdictions(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let vendor = require_vendor(&state.pool, id).await?;
    let jurisdictions = RecordRepo::jurisdiction_performance(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: VendorJurisdictions {
            vendor_id: id,
            vendor_name: vendor.name,
            jurisdictions,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /vendors/benchmark -- ranked benchmark
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BenchmarkRow {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub quality_score: f64,
    pub cost_per_record: f64,
    pub coverage_percentage: f64,
    pub value_index: f64,
    pub total_records: i64,
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_freshness_days: f64,
}

#[derive(Debug, Serialize)]
pub struct BenchmarkSummary {
    pub total_vendors: usize,
    pub avg_quality_score: f64,
    pub avg_cost_per_record: f64,
    pub avg_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct Benchmark {
    pub vendors: Vec<BenchmarkRow>,
    pub summary: BenchmarkSummary,
}

/// Score every active vendor and rank descending by composite score.
///
/// The sort is stable, so vendors with identical scores keep their original
/// id order.
pub async fn benchmark_vendors(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list_active(&state.pool).await?;

    let mut rows = Vec::with_capacity(vendors.len());
    for vendor in &vendors {
        let metrics = compute_vendor_metrics(&state.pool, vendor).await?;
        rows.push(BenchmarkRow {
            vendor_id: vendor.id,
            vendor_name: vendor.name.clone(),
            quality_score: metrics.quality_score,
            cost_per_record: vendor.cost_per_record,
            coverage_percentage: vendor.coverage_percentage,
            value_index: calculate_value_index(metrics.quality_score, vendor.cost_per_record),
            total_records: metrics.total_records,
            pii_completeness: metrics.pii_completeness,
            disposition_accuracy: metrics.disposition_accuracy,
            avg_freshness_days: metrics.avg_freshness_days,
        });
    }

    rows.sort_by(|a, b| {
        b.quality_score
            .partial_cmp(&a.quality_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let quality: Vec<f64> = rows.iter().map(|r| r.quality_score).collect();
    let costs: Vec<f64> = rows.iter().map(|r| r.cost_per_record).collect();
    let coverage: Vec<f64> = rows.iter().map(|r| r.coverage_percentage).collect();

    let summary = BenchmarkSummary {
        total_vendors: rows.len(),
        avg_quality_score: round2(mean(&quality)),
        avg_cost_per_record: round2(mean(&costs)),
        avg_coverage: round2(mean(&coverage)),
    };

    Ok(Json(DataResponse {
        data: Benchmark {
            vendors: rows,
            summary,
        },
    }))
}
