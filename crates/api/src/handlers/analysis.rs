//! Handlers for schema-change auditing, quality trends, cross-vendor
//! performance metrics, and requirements-driven recommendations.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use veriscore_core::error::CoreError;
use veriscore_core::ranking;
use veriscore_core::scoring::{calculate_value_index, performance_grade};
use veriscore_core::stats::mean;
use veriscore_core::types::{round2, DbId};
use veriscore_core::validation;
use veriscore_db::models::record::{RecordSample, TrendPoint};
use veriscore_db::models::schema_change::SchemaChange;
use veriscore_db::repositories::{RecordRepo, SchemaChangeRepo, VendorRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{compute_vendor_metrics, require_vendor};
use crate::response::DataResponse;
use crate::state::AppState;

/// Affected-record threshold above which a change's quality impact is
/// reported as medium instead of low.
const MEDIUM_IMPACT_RECORDS: i32 = 100;

/// Sample size fetched for impact assessment (only the first 10 returned).
const IMPACT_SAMPLE_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// GET /analysis/schema-changes -- change log
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChangeLogQuery {
    pub vendor_id: Option<DbId>,
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChangeLogFilters {
    pub vendor_id: Option<DbId>,
    pub days: i64,
}

#[derive(Debug, Serialize)]
pub struct ChangeLog {
    pub filters: ChangeLogFilters,
    pub changes: Vec<SchemaChange>,
}

/// Schema changes within the trailing window, newest first.
pub async fn schema_changes(
    State(state): State<AppState>,
    Query(params): Query<ChangeLogQuery>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(90);
    validation::validate_window_days(days)?;

    let changes = SchemaChangeRepo::list(&state.pool, params.vendor_id, days as i32).await?;

    Ok(Json(DataResponse {
        data: ChangeLog {
            filters: ChangeLogFilters {
                vendor_id: params.vendor_id,
                days,
            },
            changes,
        },
    }))
}

#[derive(Debug, Serialize)]
pub struct VendorChangeLog {
    pub vendor_id: DbId,
    pub period_days: i64,
    pub changes: Vec<SchemaChange>,
}

/// Schema changes for one vendor.
pub async fn vendor_schema_changes(
    State(state): State<AppState>,
    Path(vendor_id): Path<DbId>,
    Query(params): Query<ChangeLogQuery>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(90);
    validation::validate_window_days(days)?;

    let changes = SchemaChangeRepo::list(&state.pool, Some(vendor_id), days as i32).await?;

    Ok(Json(DataResponse {
        data: VendorChangeLog {
            vendor_id,
            period_days: days,
            changes,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /analysis/impact-assessment/{change_id}
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ImpactDetail {
    pub total_records_affected: i32,
    pub sample_records_analyzed: usize,
    pub data_quality_impact: &'static str,
    pub recommended_actions: [&'static str; 3],
}

#[derive(Debug, Serialize)]
pub struct ImpactAssessment {
    pub schema_change: SchemaChange,
    pub impact_assessment: ImpactDetail,
    pub affected_records_sample: Vec<RecordSample>,
}

/// Detailed impact assessment for a single schema change.
pub async fn impact_assessment(
    State(state): State<AppState>,
    Path(change_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let change = SchemaChangeRepo::find_by_id(&state.pool, change_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Schema change",
            id: change_id,
        })?;

    let mut sample = RecordRepo::sample_before(
        &state.pool,
        change.vendor_id,
        change.change_date,
        IMPACT_SAMPLE_LIMIT,
    )
    .await?;
    let analyzed = sample.len();
    sample.truncate(10);

    let impact = ImpactDetail {
        total_records_affected: change.records_affected,
        sample_records_analyzed: analyzed,
        data_quality_impact: if change.records_affected > MEDIUM_IMPACT_RECORDS {
            "medium"
        } else {
            "low"
        },
        recommended_actions: [
            "Monitor data quality metrics closely",
            "Run validation checks on affected records",
            "Consider reprocessing affected records if necessary",
        ],
    };

    Ok(Json(DataResponse {
        data: ImpactAssessment {
            schema_change: change,
            impact_assessment: impact,
            affected_records_sample: sample,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /analysis/quality-trends/{vendor_id}
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TrendsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct QualityTrends {
    pub vendor_id: DbId,
    pub period_days: i64,
    pub trends: Vec<TrendPoint>,
}

/// Per-day quality data points over the trailing window; dates with no
/// deliveries are omitted.
pub async fn quality_trends(
    State(state): State<AppState>,
    Path(vendor_id): Path<DbId>,
    Query(params): Query<TrendsQuery>,
) -> AppResult<impl IntoResponse> {
    let days = params.days.unwrap_or(90);
    validation::validate_window_days(days)?;

    require_vendor(&state.pool, vendor_id).await?;
    let trends = RecordRepo::daily_trends(&state.pool, vendor_id, days as i32).await?;

    Ok(Json(DataResponse {
        data: QualityTrends {
            vendor_id,
            period_days: days,
            trends,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /analysis/performance-metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    /// Comma-separated vendor ids; all active vendors when absent.
    pub vendor_ids: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PerformanceRow {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub quality_score: f64,
    pub cost_per_record: f64,
    pub value_index: f64,
    pub coverage_percentage: f64,
    pub total_records: i64,
    pub avg_turnaround_hours: f64,
    pub performance_grade: &'static str,
    pub jurisdictions_covered: usize,
}

#[derive(Debug, Serialize)]
pub struct PerformanceSummary {
    pub total_vendors: usize,
    pub avg_quality_score: f64,
    pub avg_cost_per_record: f64,
    pub avg_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct PerformanceMetrics {
    pub vendors: Vec<PerformanceRow>,
    pub summary: PerformanceSummary,
}

fn parse_id_list(raw: &str) -> Result<Vec<DbId>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("Invalid vendor id: {s}")))
        })
        .collect()
}

/// Comprehensive performance indicators for the requested (or all active)
/// vendors.
pub async fn performance_metrics(
    State(state): State<AppState>,
    Query(params): Query<PerformanceQuery>,
) -> AppResult<impl IntoResponse> {
    let vendors = match &params.vendor_ids {
        Some(raw) => {
            let mut vendors = Vec::new();
            for id in parse_id_list(raw)? {
                vendors.push(require_vendor(&state.pool, id).await?);
            }
            vendors
        }
        None => VendorRepo::list_active(&state.pool).await?,
    };

    let mut rows = Vec::with_capacity(vendors.len());
    for vendor in &vendors {
        let metrics = compute_vendor_metrics(&state.pool, vendor).await?;
        let jurisdictions = RecordRepo::jurisdiction_performance(&state.pool, vendor.id).await?;

        let turnarounds: Vec<f64> =
            jurisdictions.iter().map(|j| j.avg_turnaround_hours).collect();

        rows.push(PerformanceRow {
            vendor_id: vendor.id,
            vendor_name: vendor.name.clone(),
            quality_score: metrics.quality_score,
            cost_per_record: vendor.cost_per_record,
            value_index: calculate_value_index(metrics.quality_score, vendor.cost_per_record),
            coverage_percentage: vendor.coverage_percentage,
            total_records: metrics.total_records,
            avg_turnaround_hours: round2(mean(&turnarounds)),
            performance_grade: performance_grade(metrics.quality_score),
            jurisdictions_covered: jurisdictions.len(),
        });
    }

    let quality: Vec<f64> = rows.iter().map(|r| r.quality_score).collect();
    let costs: Vec<f64> = rows.iter().map(|r| r.cost_per_record).collect();
    let coverage: Vec<f64> = rows.iter().map(|r| r.coverage_percentage).collect();

    Ok(Json(DataResponse {
        data: PerformanceMetrics {
            summary: PerformanceSummary {
                total_vendors: rows.len(),
                avg_quality_score: round2(mean(&quality)),
                avg_cost_per_record: round2(mean(&costs)),
                avg_coverage: round2(mean(&coverage)),
            },
            vendors: rows,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /analysis/recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub annual_volume: Option<i64>,
    /// Comma-separated subset of quality/cost/coverage/value.
    pub priority_factors: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRow {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub recommendation_score: f64,
    pub quality_score: f64,
    pub cost_per_record: f64,
    pub coverage_percentage: f64,
    pub value_index: f64,
    pub annual_cost: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub best_for: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RecommendationRequirements {
    pub annual_volume: i64,
    pub priority_factors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Recommendations {
    pub requirements: RecommendationRequirements,
    pub recommendations: Vec<RecommendationRow>,
    pub top_pick: Option<RecommendationRow>,
}

const ALL_FACTORS: [&str; 4] = ["quality", "cost", "coverage", "value"];

/// Rank active vendors for a buyer's requirements.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationsQuery>,
) -> AppResult<impl IntoResponse> {
    let annual_volume = params.annual_volume.unwrap_or(10_000);
    if annual_volume < validation::MIN_ANNUAL_VOLUME {
        return Err(CoreError::Validation(format!(
            "annual_volume must be at least {}",
            validation::MIN_ANNUAL_VOLUME
        ))
        .into());
    }

    let factors: Vec<String> = params
        .priority_factors
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let vendors = VendorRepo::list_active(&state.pool).await?;
    let mut rows = Vec::with_capacity(vendors.len());

    for vendor in &vendors {
        let metrics = compute_vendor_metrics(&state.pool, vendor).await?;
        let value_index = calculate_value_index(metrics.quality_score, vendor.cost_per_record);

        rows.push(RecommendationRow {
            vendor_id: vendor.id,
            vendor_name: vendor.name.clone(),
            recommendation_score: round2(ranking::factor_weighted_score(
                &factors,
                metrics.quality_score,
                vendor.cost_per_record,
                vendor.coverage_percentage,
                value_index,
            )),
            quality_score: metrics.quality_score,
            cost_per_record: vendor.cost_per_record,
            coverage_percentage: vendor.coverage_percentage,
            value_index,
            annual_cost: vendor.cost_per_record * annual_volume as f64,
            strengths: ranking::vendor_strengths(
                vendor.cost_per_record,
                vendor.coverage_percentage,
                &metrics,
            ),
            weaknesses: ranking::vendor_weaknesses(
                vendor.cost_per_record,
                vendor.coverage_percentage,
                &metrics,
            ),
            best_for: ranking::best_use_case(
                vendor.cost_per_record,
                vendor.coverage_percentage,
                &metrics,
            ),
        });
    }

    rows.sort_by(|a, b| {
        b.recommendation_score
            .partial_cmp(&a.recommendation_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let requirements = RecommendationRequirements {
        annual_volume,
        priority_factors: if factors.is_empty() {
            ALL_FACTORS.iter().map(|s| s.to_string()).collect()
        } else {
            factors
        },
    };

    Ok(Json(DataResponse {
        data: Recommendations {
            requirements,
            top_pick: rows.first().cloned(),
            recommendations: rows,
        },
    }))
}
