//! Recommendation scoring and qualitative vendor annotations.
//!
//! Two scoring paths share the same cost normalization: the quick-comparison
//! priority presets and the requirements-driven recommendation endpoint with
//! free-form priority factors.

use serde::{Deserialize, Serialize};

use crate::scoring::QualityMetrics;

/// Reference cost per record used to normalize cost into a 0-100 score;
/// a vendor at this price scores zero on the cost axis.
pub const MAX_REFERENCE_COST: f64 = 15.0;

// ---------------------------------------------------------------------------
// Priority presets (quick comparison)
// ---------------------------------------------------------------------------

/// User-selected optimization priority for a quick comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Quality,
    Cost,
    #[default]
    Balanced,
    Value,
}

/// Cost inverted into a 0-100 score, floored at zero.
fn cost_score(cost_per_record: f64) -> f64 {
    (100.0 - cost_per_record / MAX_REFERENCE_COST * 100.0).max(0.0)
}

/// Blend quality, value, and cost into a single ranking score for the
/// selected priority.
pub fn recommendation_score(
    priority: Priority,
    quality_score: f64,
    value_index: f64,
    cost_per_record: f64,
) -> f64 {
    match priority {
        Priority::Quality => quality_score * 0.8 + value_index * 0.2,
        Priority::Cost => cost_score(cost_per_record) * 0.6 + quality_score * 0.4,
        Priority::Value => value_index * 0.7 + quality_score * 0.3,
        // The balanced blend keeps the raw (unfloored) cost term; a vendor
        // priced above the reference cost is actively penalized.
        Priority::Balanced => {
            quality_score * 0.4
                + value_index * 0.3
                + (100.0 - cost_per_record / MAX_REFERENCE_COST * 100.0) * 0.3
        }
    }
}

// ---------------------------------------------------------------------------
// Priority factors (requirements-driven recommendations)
// ---------------------------------------------------------------------------

/// Weighted recommendation score for the requirements endpoint.
///
/// An empty factor list means "everything": each factor contributes its
/// weight only when requested (or when no factors were given).
pub fn factor_weighted_score(
    factors: &[String],
    quality_score: f64,
    cost_per_record: f64,
    coverage_percentage: f64,
    value_index: f64,
) -> f64 {
    let wants = |name: &str| factors.is_empty() || factors.iter().any(|f| f == name);
    let mut score = 0.0;

    if wants("quality") {
        score += quality_score * 0.4;
    }
    if wants("cost") {
        score += cost_score(cost_per_record) * 0.3;
    }
    if wants("coverage") {
        score += coverage_percentage * 0.2;
    }
    if wants("value") {
        score += (value_index * 10.0).min(100.0) * 0.1;
    }

    score
}

// ---------------------------------------------------------------------------
// Qualitative annotations
// ---------------------------------------------------------------------------

/// Metric-derived strengths shown on recommendation cards.
pub fn vendor_strengths(
    cost_per_record: f64,
    coverage_percentage: f64,
    metrics: &QualityMetrics,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if metrics.quality_score >= 90.0 {
        strengths.push("High quality score".to_string());
    }
    if cost_per_record <= 6.0 {
        strengths.push("Low cost per record".to_string());
    }
    if coverage_percentage >= 95.0 {
        strengths.push("Excellent geographic coverage".to_string());
    }
    if metrics.pii_completeness >= 95.0 {
        strengths.push("Superior PII completeness".to_string());
    }
    if metrics.disposition_accuracy >= 95.0 {
        strengths.push("High disposition accuracy".to_string());
    }

    strengths
}

/// Metric-derived weaknesses shown on recommendation cards.
pub fn vendor_weaknesses(
    cost_per_record: f64,
    coverage_percentage: f64,
    metrics: &QualityMetrics,
) -> Vec<String> {
    let mut weaknesses = Vec::new();

    if metrics.quality_score < 80.0 {
        weaknesses.push("Below average quality score".to_string());
    }
    if cost_per_record >= 10.0 {
        weaknesses.push("Higher cost per record".to_string());
    }
    if coverage_percentage < 85.0 {
        weaknesses.push("Limited geographic coverage".to_string());
    }
    if metrics.pii_completeness < 85.0 {
        weaknesses.push("PII completeness needs improvement".to_string());
    }
    if metrics.disposition_accuracy < 85.0 {
        weaknesses.push("Disposition accuracy needs improvement".to_string());
    }

    weaknesses
}

/// One-line positioning statement derived from the vendor's profile.
pub fn best_use_case(
    cost_per_record: f64,
    coverage_percentage: f64,
    metrics: &QualityMetrics,
) -> &'static str {
    if metrics.quality_score >= 90.0 && coverage_percentage < 85.0 {
        "Regional operations requiring jurisdiction expertise"
    } else if metrics.quality_score >= 90.0 {
        "High-volume, quality-critical operations"
    } else if cost_per_record <= 6.0 {
        "Budget-conscious operations with some quality tolerance"
    } else if metrics.quality_score >= 85.0 {
        "Balanced operations requiring good quality at reasonable cost"
    } else {
        "General criminal record screening"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(quality: f64, pii: f64, disposition: f64) -> QualityMetrics {
        QualityMetrics {
            quality_score: quality,
            pii_completeness: pii,
            disposition_accuracy: disposition,
            avg_freshness_days: 3.0,
            geographic_coverage: 90.0,
            total_records: 100,
        }
    }

    // -- recommendation_score --

    #[test]
    fn quality_priority_weights_quality_heaviest() {
        let score = recommendation_score(Priority::Quality, 90.0, 10.0, 12.0);
        assert_eq!(score, 90.0 * 0.8 + 10.0 * 0.2);
    }

    #[test]
    fn cost_priority_floors_the_cost_score() {
        // At $20/record the cost score bottoms out at zero instead of
        // dragging the blend negative.
        let score = recommendation_score(Priority::Cost, 80.0, 4.0, 20.0);
        assert_eq!(score, 80.0 * 0.4);
    }

    #[test]
    fn balanced_priority_keeps_raw_cost_term() {
        let score = recommendation_score(Priority::Balanced, 90.0, 6.0, 18.0);
        let expected = 90.0 * 0.4 + 6.0 * 0.3 + (100.0 - 18.0 / 15.0 * 100.0) * 0.3;
        assert!((score - expected).abs() < 1e-9);
        assert!(expected < 90.0 * 0.4 + 6.0 * 0.3);
    }

    #[test]
    fn value_priority_prefers_value_index() {
        let cheap_good = recommendation_score(Priority::Value, 85.0, 12.0, 7.0);
        let pricey_better = recommendation_score(Priority::Value, 95.0, 5.0, 18.0);
        assert!(cheap_good > pricey_better);
    }

    // -- factor_weighted_score --

    #[test]
    fn empty_factors_means_all_factors() {
        let all = factor_weighted_score(&[], 90.0, 9.0, 92.0, 10.0);
        let expected = 90.0 * 0.4 + (100.0 - 9.0 / 15.0 * 100.0) * 0.3 + 92.0 * 0.2 + 100.0 * 0.1;
        assert!((all - expected).abs() < 1e-9);
    }

    #[test]
    fn single_factor_contributes_only_its_weight() {
        let quality_only =
            factor_weighted_score(&["quality".to_string()], 90.0, 9.0, 92.0, 10.0);
        assert_eq!(quality_only, 90.0 * 0.4);
    }

    #[test]
    fn value_factor_is_capped_at_one_hundred() {
        // A value index of 20 would normalize to 200; it must cap at 100.
        let score = factor_weighted_score(&["value".to_string()], 0.0, 0.0, 0.0, 20.0);
        assert_eq!(score, 100.0 * 0.1);
    }

    // -- annotations --

    #[test]
    fn premium_vendor_strengths() {
        let strengths = vendor_strengths(12.0, 98.0, &metrics(95.0, 96.0, 95.0));
        assert!(strengths.contains(&"High quality score".to_string()));
        assert!(strengths.contains(&"Excellent geographic coverage".to_string()));
        assert!(strengths.contains(&"Superior PII completeness".to_string()));
        assert!(!strengths.contains(&"Low cost per record".to_string()));
    }

    #[test]
    fn budget_vendor_weaknesses() {
        let weaknesses = vendor_weaknesses(5.0, 85.0, &metrics(76.0, 78.0, 80.0));
        assert!(weaknesses.contains(&"Below average quality score".to_string()));
        assert!(weaknesses.contains(&"PII completeness needs improvement".to_string()));
        assert!(!weaknesses.contains(&"Higher cost per record".to_string()));
    }

    #[test]
    fn regional_specialist_use_case() {
        assert_eq!(
            best_use_case(10.0, 75.0, &metrics(92.0, 90.0, 93.0)),
            "Regional operations requiring jurisdiction expertise"
        );
        assert_eq!(
            best_use_case(12.0, 98.0, &metrics(95.0, 96.0, 95.0)),
            "High-volume, quality-critical operations"
        );
        assert_eq!(
            best_use_case(5.0, 85.0, &metrics(78.0, 75.0, 80.0)),
            "Budget-conscious operations with some quality tolerance"
        );
        assert_eq!(
            best_use_case(8.0, 92.0, &metrics(88.0, 85.0, 90.0)),
            "Balanced operations requiring good quality at reasonable cost"
        );
        assert_eq!(
            best_use_case(9.0, 90.0, &metrics(70.0, 70.0, 70.0)),
            "General criminal record screening"
        );
    }
}
