//! Comparative analytics: what-if switching, total cost of ownership, and
//! market benchmarks.
//!
//! Everything here operates on vendor snapshots the caller has already
//! scored; no function reaches back into storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scoring::QualityMetrics;
use crate::stats::{self, MetricBenchmark};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A scored vendor as the analytics functions see it.
#[derive(Debug, Clone, Serialize)]
pub struct VendorSnapshot {
    pub id: DbId,
    pub name: String,
    pub cost_per_record: f64,
    pub quality_score: f64,
    pub coverage_percentage: f64,
    #[serde(skip)]
    pub total_records: i64,
}

/// Per-jurisdiction performance row for one vendor.
///
/// `coverage_percentage` and `avg_turnaround_hours` come from the coverage
/// table as-is; the two rate fields are computed over the jurisdiction's
/// record subset and are fractions x100. A jurisdiction with coverage but no
/// records reports zero counts and zero rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JurisdictionPerformance {
    pub jurisdiction: String,
    pub state: String,
    pub coverage_percentage: f64,
    pub avg_turnaround_hours: f64,
    pub record_count: i64,
    pub pii_completeness_rate: f64,
    pub disposition_accuracy_rate: f64,
}

/// Optional filters for side-by-side comparison rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComparisonFilters {
    pub jurisdictions: Option<Vec<String>>,
    pub min_coverage: Option<f64>,
}

/// Drop jurisdiction rows excluded by the request filters.
pub fn apply_filters(
    rows: Vec<JurisdictionPerformance>,
    filters: &ComparisonFilters,
) -> Vec<JurisdictionPerformance> {
    rows.into_iter()
        .filter(|row| {
            if let Some(names) = &filters.jurisdictions {
                if !names.contains(&row.jurisdiction) {
                    return false;
                }
            }
            if let Some(min) = filters.min_coverage {
                if row.coverage_percentage < min {
                    return false;
                }
            }
            true
        })
        .collect()
}

// ---------------------------------------------------------------------------
// What-if analysis
// ---------------------------------------------------------------------------

/// Risk classification for a vendor switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Coverage/turnaround delta for one jurisdiction across the switch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JurisdictionDelta {
    pub jurisdiction: String,
    pub current_coverage: f64,
    pub new_coverage: f64,
    pub coverage_delta: f64,
    pub current_turnaround: f64,
    pub new_turnaround: f64,
    pub turnaround_delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WhatIfScenario {
    pub current_vendor: VendorSnapshot,
    pub new_vendor: VendorSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialImpact {
    pub annual_volume: i64,
    pub current_annual_cost: f64,
    pub new_annual_cost: f64,
    pub annual_savings: f64,
    pub monthly_savings: f64,
    pub savings_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityImpact {
    pub quality_delta: f64,
    pub current_quality_score: f64,
    pub new_quality_score: f64,
    pub quality_change_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageImpact {
    pub coverage_delta: f64,
    pub current_coverage: f64,
    pub new_coverage: f64,
    pub coverage_comparison: Vec<JurisdictionDelta>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoiAnalysis {
    /// `None` when monthly savings are non-positive; there is no payback on
    /// a switch that costs money.
    pub payback_period_months: Option<f64>,
    pub annual_roi_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub risk_factors: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Full what-if result for switching from one vendor to another.
#[derive(Debug, Clone, Serialize)]
pub struct WhatIfAnalysis {
    pub scenario: WhatIfScenario,
    pub financial_impact: FinancialImpact,
    pub quality_impact: QualityImpact,
    pub coverage_impact: CoverageImpact,
    pub roi_analysis: RoiAnalysis,
    pub risk_assessment: RiskAssessment,
}

/// Project the impact of switching `annual_volume` records per year from
/// `current` to `new`.
pub fn what_if(
    current: VendorSnapshot,
    new: VendorSnapshot,
    current_jurisdictions: &[JurisdictionPerformance],
    new_jurisdictions: &[JurisdictionPerformance],
    annual_volume: i64,
) -> WhatIfAnalysis {
    let volume = annual_volume as f64;
    let current_annual_cost = current.cost_per_record * volume;
    let new_annual_cost = new.cost_per_record * volume;
    let cost_savings = current_annual_cost - new_annual_cost;
    let monthly_savings = cost_savings / 12.0;

    let quality_delta = new.quality_score - current.quality_score;
    let coverage_delta = new.coverage_percentage - current.coverage_percentage;

    let coverage_comparison = join_jurisdictions(current_jurisdictions, new_jurisdictions);

    let mut risk_factors = Vec::new();
    if quality_delta < -5.0 {
        risk_factors.push("Significant quality decrease".to_string());
    }
    if coverage_delta < -10.0 {
        risk_factors.push("Major coverage reduction".to_string());
    }
    if (new.total_records as f64) < current.total_records as f64 * 0.5 {
        risk_factors.push("Limited track record (fewer records)".to_string());
    }
    let risk_level = match risk_factors.len() {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    };

    WhatIfAnalysis {
        financial_impact: FinancialImpact {
            annual_volume,
            current_annual_cost,
            new_annual_cost,
            annual_savings: cost_savings,
            monthly_savings,
            savings_percentage: if current_annual_cost > 0.0 {
                cost_savings / current_annual_cost * 100.0
            } else {
                0.0
            },
        },
        quality_impact: QualityImpact {
            quality_delta,
            current_quality_score: current.quality_score,
            new_quality_score: new.quality_score,
            quality_change_percentage: if current.quality_score > 0.0 {
                quality_delta / current.quality_score * 100.0
            } else {
                0.0
            },
        },
        coverage_impact: CoverageImpact {
            coverage_delta,
            current_coverage: current.coverage_percentage,
            new_coverage: new.coverage_percentage,
            coverage_comparison,
        },
        roi_analysis: RoiAnalysis {
            payback_period_months: if monthly_savings > 0.0 {
                Some(cost_savings / monthly_savings)
            } else {
                None
            },
            annual_roi_percentage: if new_annual_cost > 0.0 {
                cost_savings / new_annual_cost * 100.0
            } else {
                0.0
            },
        },
        risk_assessment: RiskAssessment {
            risk_factors,
            risk_level,
        },
        scenario: WhatIfScenario {
            current_vendor: current,
            new_vendor: new,
        },
    }
}

/// Full outer join of two vendors' jurisdiction rows by jurisdiction name,
/// defaulting the missing side to zero coverage and zero turnaround.
fn join_jurisdictions(
    current: &[JurisdictionPerformance],
    new: &[JurisdictionPerformance],
) -> Vec<JurisdictionDelta> {
    let mut names: BTreeMap<&str, (Option<&JurisdictionPerformance>, Option<&JurisdictionPerformance>)> =
        BTreeMap::new();

    for row in current {
        names.entry(&row.jurisdiction).or_default().0 = Some(row);
    }
    for row in new {
        names.entry(&row.jurisdiction).or_default().1 = Some(row);
    }

    names
        .into_iter()
        .map(|(name, (cur, new))| {
            let (cur_cov, cur_turn) = cur
                .map(|r| (r.coverage_percentage, r.avg_turnaround_hours))
                .unwrap_or((0.0, 0.0));
            let (new_cov, new_turn) = new
                .map(|r| (r.coverage_percentage, r.avg_turnaround_hours))
                .unwrap_or((0.0, 0.0));
            JurisdictionDelta {
                jurisdiction: name.to_string(),
                current_coverage: cur_cov,
                new_coverage: new_cov,
                coverage_delta: new_cov - cur_cov,
                current_turnaround: cur_turn,
                new_turnaround: new_turn,
                turnaround_delta: new_turn - cur_turn,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Total cost of ownership
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CostLine {
    pub annual: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostBreakdown {
    pub record_costs: RecordCosts,
    pub quality_costs: QualityCosts,
    pub coverage_costs: CoverageCosts,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordCosts {
    pub annual: f64,
    pub total: f64,
    pub per_record: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityCosts {
    pub annual: f64,
    pub total: f64,
    pub quality_factor: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageCosts {
    pub annual: f64,
    pub total: f64,
    pub coverage_gap: f64,
}

/// Multi-year cost projection including quality and coverage penalties.
#[derive(Debug, Clone, Serialize)]
pub struct TcoAnalysis {
    pub vendor_name: String,
    pub analysis_period_years: i64,
    pub annual_volume: i64,
    pub cost_breakdown: CostBreakdown,
    pub total_cost_of_ownership: f64,
    pub effective_cost_per_record: f64,
    pub metrics: QualityMetrics,
}

/// Compute total cost of ownership for a vendor over `years`.
///
/// Poor quality compounds as a 20% annual surcharge weighted by the quality
/// gap; missing coverage as a 10% annual opportunity cost weighted by the
/// coverage gap. A perfect vendor pays the base record cost exactly.
pub fn total_cost_of_ownership(
    vendor: &VendorSnapshot,
    metrics: QualityMetrics,
    annual_volume: i64,
    years: i64,
) -> TcoAnalysis {
    let volume = annual_volume as f64;
    let period = years as f64;

    let annual_record_cost = vendor.cost_per_record * volume;
    let total_record_cost = annual_record_cost * period;

    let quality_factor = (100.0 - metrics.quality_score) / 100.0;
    let annual_quality_cost = annual_record_cost * quality_factor * 0.2;
    let total_quality_cost = annual_quality_cost * period;

    let coverage_gap = 100.0 - vendor.coverage_percentage;
    let annual_coverage_cost = annual_record_cost * (coverage_gap / 100.0) * 0.1;
    let total_coverage_cost = annual_coverage_cost * period;

    let total_tco = total_record_cost + total_quality_cost + total_coverage_cost;

    TcoAnalysis {
        vendor_name: vendor.name.clone(),
        analysis_period_years: years,
        annual_volume,
        cost_breakdown: CostBreakdown {
            record_costs: RecordCosts {
                annual: annual_record_cost,
                total: total_record_cost,
                per_record: vendor.cost_per_record,
            },
            quality_costs: QualityCosts {
                annual: annual_quality_cost,
                total: total_quality_cost,
                quality_factor,
            },
            coverage_costs: CoverageCosts {
                annual: annual_coverage_cost,
                total: total_coverage_cost,
                coverage_gap,
            },
        },
        total_cost_of_ownership: total_tco,
        effective_cost_per_record: total_tco / (volume * period),
        metrics,
    }
}

// ---------------------------------------------------------------------------
// Market benchmarks
// ---------------------------------------------------------------------------

/// Population-wide benchmark summary across the three headline metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MarketBenchmarks {
    pub quality_benchmarks: MetricBenchmark,
    pub cost_benchmarks: MetricBenchmark,
    pub coverage_benchmarks: MetricBenchmark,
    pub market_size: usize,
}

/// Summarize the active vendor population; `None` when it is empty.
pub fn market_benchmarks(vendors: &[VendorSnapshot]) -> Option<MarketBenchmarks> {
    let quality: Vec<f64> = vendors.iter().map(|v| v.quality_score).collect();
    let costs: Vec<f64> = vendors.iter().map(|v| v.cost_per_record).collect();
    let coverage: Vec<f64> = vendors.iter().map(|v| v.coverage_percentage).collect();

    Some(MarketBenchmarks {
        quality_benchmarks: stats::summarize(&quality)?,
        cost_benchmarks: stats::summarize(&costs)?,
        coverage_benchmarks: stats::summarize(&coverage)?,
        market_size: vendors.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
