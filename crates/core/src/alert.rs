//! SLA threshold evaluation.
//!
//! Each alert type is a proper enum variant with its own evaluation function
//! and breach direction; the dispatcher in [`evaluate`] is the only place
//! that matches on the type. Breaches are synthesized values -- persisting
//! them is an explicit, separate decision made by the caller.

use serde::{Deserialize, Serialize};

use crate::types::round2;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a threshold watch is measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    PiiCompleteness,
    DispositionAccuracy,
    TurnaroundTime,
    CoverageDrop,
    QualityDrop,
}

impl AlertType {
    pub const ALL: [AlertType; 5] = [
        Self::PiiCompleteness,
        Self::DispositionAccuracy,
        Self::TurnaroundTime,
        Self::CoverageDrop,
        Self::QualityDrop,
    ];

    /// Type name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PiiCompleteness => "pii_completeness",
            Self::DispositionAccuracy => "disposition_accuracy",
            Self::TurnaroundTime => "turnaround_time",
            Self::CoverageDrop => "coverage_drop",
            Self::QualityDrop => "quality_drop",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "pii_completeness" => Some(Self::PiiCompleteness),
            "disposition_accuracy" => Some(Self::DispositionAccuracy),
            "turnaround_time" => Some(Self::TurnaroundTime),
            "coverage_drop" => Some(Self::CoverageDrop),
            "quality_drop" => Some(Self::QualityDrop),
            _ => None,
        }
    }

    /// Fixed severity assigned to breaches of this type.
    pub fn severity(&self) -> AlertSeverity {
        match self {
            Self::PiiCompleteness | Self::DispositionAccuracy | Self::QualityDrop => {
                AlertSeverity::High
            }
            Self::TurnaroundTime | Self::CoverageDrop => AlertSeverity::Medium,
        }
    }
}

/// Breach severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Lifecycle state of a persisted alert.
///
/// Transitions run strictly forward (active -> acknowledged -> resolved) but
/// carry no guards: re-acknowledging or resolving out of order simply
/// restamps the timestamp. Callers must not add validation here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [AlertStatus; 3] = [Self::Active, Self::Acknowledged, Self::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation inputs/outputs
// ---------------------------------------------------------------------------

/// Current vendor state an evaluation runs against.
///
/// `recent_avg_turnaround_hours` is `None` when the vendor delivered nothing
/// in the trailing window; absence of data is not a breach.
#[derive(Debug, Clone, Copy)]
pub struct MetricSnapshot {
    pub pii_completeness: f64,
    pub disposition_accuracy: f64,
    pub recent_avg_turnaround_hours: Option<f64>,
    pub coverage_percentage: f64,
    /// Last cached composite score from the vendor row.
    pub quality_score: f64,
}

/// A synthesized threshold breach (not persisted by the evaluator).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertBreach {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub current_value: f64,
    pub threshold_value: f64,
    pub variance: f64,
}

impl AlertBreach {
    fn new(
        alert_type: AlertType,
        title: &str,
        description: String,
        current_value: f64,
        threshold_value: f64,
    ) -> Self {
        Self {
            alert_type,
            severity: alert_type.severity(),
            title: title.to_string(),
            description,
            current_value,
            threshold_value,
            variance: round2((threshold_value - current_value).abs()),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-variant evaluation
// ---------------------------------------------------------------------------

fn eval_pii_completeness(snapshot: &MetricSnapshot, threshold: f64) -> Option<AlertBreach> {
    let current = snapshot.pii_completeness;
    (current < threshold).then(|| {
        AlertBreach::new(
            AlertType::PiiCompleteness,
            "PII Completeness Below Threshold",
            format!("PII completeness ({current:.1}%) is below threshold ({threshold}%)"),
            current,
            threshold,
        )
    })
}

fn eval_disposition_accuracy(snapshot: &MetricSnapshot, threshold: f64) -> Option<AlertBreach> {
    let current = snapshot.disposition_accuracy;
    (current < threshold).then(|| {
        AlertBreach::new(
            AlertType::DispositionAccuracy,
            "Disposition Accuracy Below Threshold",
            format!("Disposition accuracy ({current:.1}%) is below threshold ({threshold}%)"),
            current,
            threshold,
        )
    })
}

fn eval_turnaround_time(snapshot: &MetricSnapshot, threshold: f64) -> Option<AlertBreach> {
    // No deliveries in the window means nothing to measure, not a breach.
    let current = snapshot.recent_avg_turnaround_hours?;
    (current > threshold).then(|| {
        AlertBreach::new(
            AlertType::TurnaroundTime,
            "Turnaround Time Above Threshold",
            format!("Average turnaround ({current:.1} hours) exceeds threshold ({threshold} hours)"),
            current,
            threshold,
        )
    })
}

fn eval_coverage_drop(snapshot: &MetricSnapshot, threshold: f64) -> Option<AlertBreach> {
    let current = snapshot.coverage_percentage;
    (current < threshold).then(|| {
        AlertBreach::new(
            AlertType::CoverageDrop,
            "Coverage Drop Detected",
            format!("Coverage ({current:.1}%) is below threshold ({threshold}%)"),
            current,
            threshold,
        )
    })
}

fn eval_quality_drop(snapshot: &MetricSnapshot, threshold: f64) -> Option<AlertBreach> {
    let current = snapshot.quality_score;
    (current < threshold).then(|| {
        AlertBreach::new(
            AlertType::QualityDrop,
            "Quality Score Drop Detected",
            format!("Quality score ({current:.1}) is below threshold ({threshold})"),
            current,
            threshold,
        )
    })
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Evaluate a single threshold watch against the current snapshot.
pub fn evaluate(
    alert_type: AlertType,
    threshold: f64,
    snapshot: &MetricSnapshot,
) -> Option<AlertBreach> {
    match alert_type {
        AlertType::PiiCompleteness => eval_pii_completeness(snapshot, threshold),
        AlertType::DispositionAccuracy => eval_disposition_accuracy(snapshot, threshold),
        AlertType::TurnaroundTime => eval_turnaround_time(snapshot, threshold),
        AlertType::CoverageDrop => eval_coverage_drop(snapshot, threshold),
        AlertType::QualityDrop => eval_quality_drop(snapshot, threshold),
    }
}

/// Evaluate every active watch, in configuration order.
pub fn evaluate_all(
    watches: &[(AlertType, f64)],
    snapshot: &MetricSnapshot,
) -> Vec<AlertBreach> {
    watches
        .iter()
        .filter_map(|&(alert_type, threshold)| evaluate(alert_type, threshold, snapshot))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MetricSnapshot {
        MetricSnapshot {
            pii_completeness: 88.0,
            disposition_accuracy: 92.0,
            recent_avg_turnaround_hours: Some(48.0),
            coverage_percentage: 85.0,
            quality_score: 81.5,
        }
    }

    #[test]
    fn pii_below_threshold_breaches_high() {
        let breach = evaluate(AlertType::PiiCompleteness, 90.0, &snapshot()).unwrap();
        assert_eq!(breach.severity, AlertSeverity::High);
        assert_eq!(breach.current_value, 88.0);
        assert_eq!(breach.variance, 2.0);
    }

    #[test]
    fn pii_at_threshold_does_not_breach() {
        assert!(evaluate(AlertType::PiiCompleteness, 88.0, &snapshot()).is_none());
    }

    #[test]
    fn turnaround_breaches_in_the_opposite_direction() {
        // Turnaround alerts fire when the value EXCEEDS the threshold.
        let breach = evaluate(AlertType::TurnaroundTime, 24.0, &snapshot()).unwrap();
        assert_eq!(breach.severity, AlertSeverity::Medium);
        assert_eq!(breach.current_value, 48.0);
        assert_eq!(breach.variance, 24.0);

        assert!(evaluate(AlertType::TurnaroundTime, 72.0, &snapshot()).is_none());
    }

    #[test]
    fn turnaround_with_no_recent_records_never_breaches() {
        let mut snap = snapshot();
        snap.recent_avg_turnaround_hours = None;
        assert!(evaluate(AlertType::TurnaroundTime, 1.0, &snap).is_none());
    }

    #[test]
    fn coverage_drop_is_medium_severity() {
        let breach = evaluate(AlertType::CoverageDrop, 90.0, &snapshot()).unwrap();
        assert_eq!(breach.severity, AlertSeverity::Medium);
        assert_eq!(breach.variance, 5.0);
    }

    #[test]
    fn quality_drop_reads_the_cached_score() {
        let breach = evaluate(AlertType::QualityDrop, 85.0, &snapshot()).unwrap();
        assert_eq!(breach.severity, AlertSeverity::High);
        assert_eq!(breach.current_value, 81.5);
        assert_eq!(breach.variance, 3.5);
    }

    #[test]
    fn evaluate_all_keeps_configuration_order() {
        let watches = [
            (AlertType::QualityDrop, 85.0),
            (AlertType::PiiCompleteness, 90.0),
            (AlertType::CoverageDrop, 50.0),
        ];
        let breaches = evaluate_all(&watches, &snapshot());
        assert_eq!(breaches.len(), 2);
        assert_eq!(breaches[0].alert_type, AlertType::QualityDrop);
        assert_eq!(breaches[1].alert_type, AlertType::PiiCompleteness);
    }

    #[test]
    fn type_strings_round_trip() {
        for alert_type in AlertType::ALL {
            assert_eq!(AlertType::parse_str(alert_type.as_str()), Some(alert_type));
        }
        assert_eq!(AlertType::parse_str("bogus"), None);
    }
}
