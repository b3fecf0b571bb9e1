//! Population statistics for market benchmarking.
//!
//! Percentiles use the nearest-rank method (no interpolation): the value at
//! index `floor(p * n)` of the ascending-sorted series, clamped to the last
//! element. The median is the nearest-rank value at index `n / 2`.

use serde::Serialize;

use crate::types::round2;

/// Summary statistics for one metric across the vendor population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricBenchmark {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub average: f64,
    pub percentiles: Percentiles,
}

/// Nearest-rank percentile cuts reported alongside each benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Percentiles {
    #[serde(rename = "25th")]
    pub p25: f64,
    #[serde(rename = "75th")]
    pub p75: f64,
    #[serde(rename = "90th")]
    pub p90: f64,
}

/// Nearest-rank percentile of an ascending-sorted series.
///
/// Callers must pass a non-empty, sorted slice; `p` is a fraction in [0, 1].
pub fn nearest_rank(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64) * p) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Arithmetic mean; 0.0 for an empty series.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Summarize one metric series; `None` when the series is empty.
pub fn summarize(values: &[f64]) -> Option<MetricBenchmark> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(MetricBenchmark {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median: sorted[sorted.len() / 2],
        average: round2(mean(values)),
        percentiles: Percentiles {
            p25: nearest_rank(&sorted, 0.25),
            p75: nearest_rank(&sorted, 0.75),
            p90: nearest_rank(&sorted, 0.90),
        },
    })
}
