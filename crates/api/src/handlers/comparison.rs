//! Handlers for side-by-side comparison, what-if analysis, TCO, and market
//! benchmarks.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use veriscore_core::analysis::{
    self, ComparisonFilters, JurisdictionPerformance, VendorSnapshot,
};
use veriscore_core::error::CoreError;
use veriscore_core::scoring::calculate_value_index;
use veriscore_core::stats::mean;
use veriscore_core::types::{round2, DbId};
use veriscore_core::validation;
use veriscore_db::models::vendor::Vendor;
use veriscore_db::repositories::{CoverageRepo, JurisdictionRepo, RecordRepo, VendorRepo};

use crate::error::AppResult;
use crate::handlers::{compute_vendor_metrics, require_vendor};
use crate::response::DataResponse;
use crate::state::AppState;

fn snapshot_of(vendor: &Vendor, quality_score: f64, total_records: i64) -> VendorSnapshot {
    VendorSnapshot {
        id: vendor.id,
        name: vendor.name.clone(),
        cost_per_record: vendor.cost_per_record,
        quality_score,
        coverage_percentage: vendor.coverage_percentage,
        total_records,
    }
}

// ---------------------------------------------------------------------------
// POST /comparison/compare -- side-by-side comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    pub vendor_ids: Vec<DbId>,
    #[serde(default)]
    pub filters: ComparisonFilters,
}

#[derive(Debug, Serialize)]
pub struct MetricsBreakdown {
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_freshness_days: f64,
    pub geographic_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct ComparisonRow {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub description: Option<String>,
    pub cost_per_record: f64,
    pub quality_score: f64,
    pub value_index: f64,
    pub coverage_percentage: f64,
    pub total_records: i64,
    pub metrics_breakdown: MetricsBreakdown,
    pub jurisdiction_performance: Vec<JurisdictionPerformance>,
}

#[derive(Debug, Serialize)]
pub struct ComparisonSummary {
    pub total_vendors: usize,
    pub avg_quality_score: f64,
    pub avg_cost_per_record: f64,
    pub avg_coverage: f64,
}

#[derive(Debug, Serialize)]
pub struct Comparison {
    pub vendors: Vec<ComparisonRow>,
    pub comparison_summary: ComparisonSummary,
}

/// Compare 2-10 distinct stored vendors side by side.
pub async fn compare_vendors(
    State(state): State<AppState>,
    Json(request): Json<ComparisonRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_comparison_ids(&request.vendor_ids)?;

    let mut rows = Vec::with_capacity(request.vendor_ids.len());
    for &vendor_id in &request.vendor_ids {
        let vendor = require_vendor(&state.pool, vendor_id).await?;
        let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;
        let jurisdiction_rows =
            RecordRepo::jurisdiction_performance(&state.pool, vendor_id).await?;

        rows.push(ComparisonRow {
            vendor_id: vendor.id,
            vendor_name: vendor.name,
            description: vendor.description,
            cost_per_record: vendor.cost_per_record,
            quality_score: metrics.quality_score,
            value_index: calculate_value_index(metrics.quality_score, vendor.cost_per_record),
            coverage_percentage: vendor.coverage_percentage,
            total_records: metrics.total_records,
            metrics_breakdown: MetricsBreakdown {
                pii_completeness: metrics.pii_completeness,
                disposition_accuracy: metrics.disposition_accuracy,
                avg_freshness_days: metrics.avg_freshness_days,
                geographic_coverage: metrics.geographic_coverage,
            },
            jurisdiction_performance: analysis::apply_filters(
                jurisdiction_rows,
                &request.filters,
            ),
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

    let summary = ComparisonSummary {
        total_vendors: rows.len(),
        avg_quality_score: round2(mean(&quality)),
        avg_cost_per_record: round2(mean(&costs)),
        avg_coverage: round2(mean(&coverage)),
    };

    Ok(Json(DataResponse {
        data: Comparison {
            vendors: rows,
            comparison_summary: summary,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /comparison/whatif -- vendor-switch projection
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct WhatIfRequest {
    pub current_vendor_id: DbId,
    pub new_vendor_id: DbId,
    pub annual_volume: i64,
}

/// Project the cost, quality, and coverage impact of switching vendors.
pub async fn what_if_analysis(
    State(state): State<AppState>,
    Json(request): Json<WhatIfRequest>,
) -> AppResult<impl IntoResponse> {
    if request.current_vendor_id == request.new_vendor_id {
        return Err(CoreError::Validation(
            "Current and new vendor must be different".to_string(),
        )
        .into());
    }
    validation::validate_annual_volume(request.annual_volume)?;

    let current = require_vendor(&state.pool, request.current_vendor_id).await?;
    let new = require_vendor(&state.pool, request.new_vendor_id).await?;

    let current_metrics = compute_vendor_metrics(&state.pool, &current).await?;
    let new_metrics = compute_vendor_metrics(&state.pool, &new).await?;

    let current_jurisdictions =
        RecordRepo::jurisdiction_performance(&state.pool, current.id).await?;
    let new_jurisdictions = RecordRepo::jurisdiction_performance(&state.pool, new.id).await?;

    let result = analysis::what_if(
        snapshot_of(&current, current_metrics.quality_score, current_metrics.total_records),
        snapshot_of(&new, new_metrics.quality_score, new_metrics.total_records),
        &current_jurisdictions,
        &new_jurisdictions,
        request.annual_volume,
    );

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /comparison/tco -- total cost of ownership
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TcoRequest {
    pub vendor_id: DbId,
    pub annual_volume: i64,
    #[serde(default = "default_tco_years")]
    pub years: i64,
}

fn default_tco_years() -> i64 {
    3
}

/// Multi-year TCO projection including quality and coverage penalties.
pub async fn calculate_tco(
    State(state): State<AppState>,
    Json(request): Json<TcoRequest>,
) -> AppResult<impl IntoResponse> {
    validation::validate_annual_volume(request.annual_volume)?;
    validation::validate_tco_years(request.years)?;

    let vendor = require_vendor(&state.pool, request.vendor_id).await?;
    let metrics = compute_vendor_metrics(&state.pool, &vendor).await?;

    let result = analysis::total_cost_of_ownership(
        &snapshot_of(&vendor, metrics.quality_score, metrics.total_records),
        metrics,
        request.annual_volume,
        request.years,
    );

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// GET /comparison/jurisdictions -- active jurisdictions
// ---------------------------------------------------------------------------

pub async fn list_jurisdictions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let jurisdictions = JurisdictionRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: jurisdictions }))
}

// ---------------------------------------------------------------------------
// GET /comparison/benchmarks -- market percentile benchmarks
// ---------------------------------------------------------------------------

/// Nearest-rank percentile benchmarks across the active vendor population.
pub async fn market_benchmarks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vendors = VendorRepo::list_active(&state.pool).await?;

    let mut snapshots = Vec::with_capacity(vendors.len());
    for vendor in &vendors {
        let metrics = compute_vendor_metrics(&state.pool, vendor).await?;
        snapshots.push(snapshot_of(vendor, metrics.quality_score, metrics.total_records));
    }

    let benchmarks = analysis::market_benchmarks(&snapshots)
        .ok_or_else(|| CoreError::Validation("No active vendors found".to_string()))?;

    Ok(Json(DataResponse { data: benchmarks }))
}

// ---------------------------------------------------------------------------
// GET /comparison/coverage-heatmap -- vendor x jurisdiction grid
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HeatmapCell {
    pub vendor_id: DbId,
    pub vendor_name: String,
    pub jurisdiction_id: DbId,
    pub jurisdiction_name: String,
    pub state: String,
    pub coverage_percentage: f64,
    pub color_intensity: f64,
}

#[derive(Debug, Serialize)]
pub struct HeatmapVendor {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HeatmapJurisdiction {
    pub id: DbId,
    pub name: String,
    pub state: String,
}

#[derive(Debug, Serialize)]
pub struct CoverageHeatmap {
    pub heatmap_data: Vec<HeatmapCell>,
    pub vendors: Vec<HeatmapVendor>,
    pub jurisdictions: Vec<HeatmapJurisdiction>,
}

/// Coverage grid for heatmap visualization; missing pairs read as zero.
pub async fn coverage_heatmap(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let cells = CoverageRepo::heatmap_cells(&state.pool).await?;
    let vendors = VendorRepo::list_active(&state.pool).await?;
    let jurisdictions = JurisdictionRepo::list_active(&state.pool).await?;

    Ok(Json(DataResponse {
        data: CoverageHeatmap {
            heatmap_data: cells
                .into_iter()
                .map(|c| HeatmapCell {
                    color_intensity: c.coverage_percentage / 100.0,
                    vendor_id: c.vendor_id,
                    vendor_name: c.vendor_name,
                    jurisdiction_id: c.jurisdiction_id,
                    jurisdiction_name: c.jurisdiction_name,
                    state: c.state,
                    coverage_percentage: c.coverage_percentage,
                })
                .collect(),
            vendors: vendors
                .into_iter()
                .map(|v| HeatmapVendor { id: v.id, name: v.name })
                .collect(),
            jurisdictions: jurisdictions
                .into_iter()
                .map(|j| HeatmapJurisdiction {
                    id: j.id,
                    name: j.name,
                    state: j.state,
                })
                .collect(),
        },
    }))
}
