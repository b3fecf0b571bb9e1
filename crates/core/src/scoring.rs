//! Composite quality scoring for vendor record sets.
//!
//! The composite weighting is a fixed contract shared by every consumer
//! (benchmarking, alerting, what-if analysis, the quick-comparison path):
//!
//! ```text
//! quality_score = pii_completeness      * 0.4
//!               + disposition_accuracy  * 0.3
//!               + freshness_score       * 0.2
//!               + geographic_coverage   * 0.1
//! ```
//!
//! where `freshness_score = max(0, 100 - avg_freshness_days)`.

use serde::Serialize;

use crate::record::{PiiStatus, RecordQuality};
use crate::types::round2;

// ---------------------------------------------------------------------------
// Composite weights
// ---------------------------------------------------------------------------

/// Weight of PII completeness in the composite score.
pub const WEIGHT_PII: f64 = 0.4;
/// Weight of disposition accuracy in the composite score.
pub const WEIGHT_DISPOSITION: f64 = 0.3;
/// Weight of the inverse-freshness score in the composite score.
pub const WEIGHT_FRESHNESS: f64 = 0.2;
/// Weight of geographic coverage in the composite score.
pub const WEIGHT_COVERAGE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A vendor's computed quality metrics.
///
/// All float fields are percentages (0-100) except `avg_freshness_days`,
/// which is an unclamped day count; every float is rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityMetrics {
    pub quality_score: f64,
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub avg_freshness_days: f64,
    pub geographic_coverage: f64,
    pub total_records: i64,
}

impl QualityMetrics {
    /// The all-zero metrics returned for a vendor with no records.
    pub fn empty() -> Self {
        Self {
            quality_score: 0.0,
            pii_completeness: 0.0,
            disposition_accuracy: 0.0,
            avg_freshness_days: 0.0,
            geographic_coverage: 0.0,
            total_records: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Reduce a vendor's record set into its composite quality score and
/// sub-metrics.
///
/// An empty record set is valid and yields [`QualityMetrics::empty`]; the
/// coverage percentage comes from the vendor row, not from the records.
pub fn calculate_quality_score(
    records: &[RecordQuality],
    coverage_percentage: f64,
) -> QualityMetrics {
    if records.is_empty() {
        return QualityMetrics::empty();
    }

    let total = records.len() as f64;

    let complete = records
        .iter()
        .filter(|r| r.pii_status == PiiStatus::Complete)
        .count() as f64;
    let pii_completeness = complete / total * 100.0;

    let verified = records.iter().filter(|r| r.disposition_verified).count() as f64;
    let disposition_accuracy = verified / total * 100.0;

    let avg_freshness_days = records.iter().map(|r| r.freshness_days).sum::<f64>() / total;

    let quality_score = composite_from_submetrics(
        pii_completeness,
        disposition_accuracy,
        avg_freshness_days,
        coverage_percentage,
    );

    QualityMetrics {
        quality_score,
        pii_completeness: round2(pii_completeness),
        disposition_accuracy: round2(disposition_accuracy),
        avg_freshness_days: round2(avg_freshness_days),
        geographic_coverage: round2(coverage_percentage),
        total_records: records.len() as i64,
    }
}

/// Apply the composite weighting to already-aggregated sub-metrics.
///
/// A vendor whose average case takes over 100 days to deliver contributes
/// zero to the freshness term rather than going negative.
pub fn composite_from_submetrics(
    pii_completeness: f64,
    disposition_accuracy: f64,
    avg_freshness_days: f64,
    coverage_percentage: f64,
) -> f64 {
    let freshness_score = (100.0 - avg_freshness_days).max(0.0);
    round2(
        pii_completeness * WEIGHT_PII
            + disposition_accuracy * WEIGHT_DISPOSITION
            + freshness_score * WEIGHT_FRESHNESS
            + coverage_percentage * WEIGHT_COVERAGE,
    )
}

/// Value index: quality per unit cost, rounded to two decimals.
///
/// Returns 0.0 for non-positive costs instead of dividing by zero.
pub fn calculate_value_index(quality_score: f64, cost_per_record: f64) -> f64 {
    if cost_per_record <= 0.0 {
        return 0.0;
    }
    round2(quality_score / cost_per_record)
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Letter grade bands for a composite quality score.
pub fn performance_grade(score: f64) -> &'static str {
    if score >= 95.0 {
        "A+"
    } else if score >= 90.0 {
        "A"
    } else if score >= 85.0 {
        "B+"
    } else if score >= 80.0 {
        "B"
    } else if score >= 75.0 {
        "C+"
    } else if score >= 70.0 {
        "C"
    } else {
        "D"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PiiStatus;

    fn record(pii: PiiStatus, verified: bool, freshness: f64) -> RecordQuality {
        RecordQuality {
            pii_status: pii,
            disposition_verified: verified,
            freshness_days: freshness,
            turnaround_hours: freshness * 24.0,
        }
    }

    // -- calculate_quality_score --

    #[test]
    fn empty_record_set_yields_all_zeros() {
        let metrics = calculate_quality_score(&[], 85.0);
        assert_eq!(metrics, QualityMetrics::empty());
        assert_eq!(metrics.total_records, 0);
    }

    #[test]
    fn perfect_inputs_score_exactly_one_hundred() {
        let records = vec![record(PiiStatus::Complete, true, 0.0); 4];
        let metrics = calculate_quality_score(&records, 100.0);

        assert_eq!(metrics.quality_score, 100.0);
        assert_eq!(metrics.pii_completeness, 100.0);
        assert_eq!(metrics.disposition_accuracy, 100.0);
        assert_eq!(metrics.avg_freshness_days, 0.0);
        assert_eq!(metrics.geographic_coverage, 100.0);
        assert_eq!(metrics.total_records, 4);
    }

    #[test]
    fn submetrics_are_fractions_times_one_hundred() {
        let records = vec![
            record(PiiStatus::Complete, true, 2.0),
            record(PiiStatus::Incomplete, true, 4.0),
            record(PiiStatus::Missing, false, 6.0),
            record(PiiStatus::Complete, false, 8.0),
        ];
        let metrics = calculate_quality_score(&records, 80.0);

        assert_eq!(metrics.pii_completeness, 50.0);
        assert_eq!(metrics.disposition_accuracy, 50.0);
        assert_eq!(metrics.avg_freshness_days, 5.0);
        // 50*0.4 + 50*0.3 + 95*0.2 + 80*0.1 = 62.0
        assert_eq!(metrics.quality_score, 62.0);
    }

    #[test]
    fn stale_vendors_clamp_freshness_at_zero() {
        // 150-day average freshness must contribute zero, not go negative.
        let records = vec![record(PiiStatus::Complete, true, 150.0); 2];
        let metrics = calculate_quality_score(&records, 0.0);

        assert_eq!(metrics.avg_freshness_days, 150.0);
        // 100*0.4 + 100*0.3 + 0*0.2 + 0*0.1
        assert_eq!(metrics.quality_score, 70.0);
    }

    #[test]
    fn avg_freshness_is_reported_unclamped() {
        let records = vec![record(PiiStatus::Missing, false, 250.0)];
        let metrics = calculate_quality_score(&records, 0.0);
        assert_eq!(metrics.avg_freshness_days, 250.0);
    }

    #[test]
    fn incomplete_records_do_not_count_toward_completeness() {
        let records = vec![
            record(PiiStatus::Incomplete, true, 0.0),
            record(PiiStatus::Incomplete, true, 0.0),
        ];
        let metrics = calculate_quality_score(&records, 0.0);
        assert_eq!(metrics.pii_completeness, 0.0);
    }

    #[test]
    fn cost_does_not_influence_quality_score() {
        let records = vec![
            record(PiiStatus::Complete, true, 3.0),
            record(PiiStatus::Incomplete, false, 5.0),
        ];
        let a = calculate_quality_score(&records, 90.0);
        let b = calculate_quality_score(&records, 90.0);

        // Identical sub-metrics rank identically on quality, but a cheaper
        // vendor wins on value index.
        assert_eq!(a.quality_score, b.quality_score);
        assert!(
            calculate_value_index(a.quality_score, 5.0)
                > calculate_value_index(b.quality_score, 10.0)
        );
    }

    // -- calculate_value_index --

    #[test]
    fn value_index_guards_zero_cost() {
        assert_eq!(calculate_value_index(80.0, 0.0), 0.0);
        assert_eq!(calculate_value_index(80.0, -1.0), 0.0);
    }

    #[test]
    fn value_index_is_quality_per_dollar() {
        assert_eq!(calculate_value_index(90.0, 9.0), 10.0);
        assert_eq!(calculate_value_index(88.5, 12.5), 7.08);
    }

    // -- composite_from_submetrics --

    #[test]
    fn composite_matches_fixed_weighting() {
        assert_eq!(composite_from_submetrics(100.0, 100.0, 0.0, 100.0), 100.0);
        assert_eq!(composite_from_submetrics(80.0, 90.0, 10.0, 70.0), 84.0);
    }

    // -- performance_grade --

    #[test]
    fn grade_bands() {
        assert_eq!(performance_grade(97.0), "A+");
        assert_eq!(performance_grade(95.0), "A+");
        assert_eq!(performance_grade(92.0), "A");
        assert_eq!(performance_grade(86.0), "B+");
        assert_eq!(performance_grade(81.0), "B");
        assert_eq!(performance_grade(76.0), "C+");
        assert_eq!(performance_grade(71.0), "C");
        assert_eq!(performance_grade(69.9), "D");
    }
}
