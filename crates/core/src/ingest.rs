//! Ad-hoc vendor ingestion for the quick-comparison path.
//!
//! Uploaded spreadsheets arrive with arbitrary column names; headers are
//! lowercased, trimmed, and mapped through a synonym table onto the fixed
//! vendor schema before the usual scoring formulas run. Nothing here touches
//! persistent storage.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::scoring::composite_from_submetrics;

/// Quality score assumed for an ad-hoc vendor with insufficient raw metrics.
pub const DEFAULT_QUALITY_SCORE: f64 = 70.0;

/// Maximum vendor name length accepted from uploads and requests.
pub const MAX_VENDOR_NAME_LENGTH: usize = 100;

// ---------------------------------------------------------------------------
// Input shape
// ---------------------------------------------------------------------------

/// An ad-hoc vendor supplied by upload or by the quick-comparison request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorInput {
    pub name: String,
    pub cost_per_record: f64,
    pub quality_score: Option<f64>,
    pub pii_completeness: Option<f64>,
    pub disposition_accuracy: Option<f64>,
    pub avg_freshness_days: Option<f64>,
    pub coverage_percentage: Option<f64>,
    pub description: Option<String>,
}

/// Use the supplied quality score, or derive one from raw sub-metrics with
/// the standard composite weighting.
///
/// The raw path requires pii, disposition, and coverage to be present and
/// nonzero, and freshness to be present (zero days is valid); anything less
/// falls back to [`DEFAULT_QUALITY_SCORE`].
pub fn effective_quality_score(input: &VendorInput) -> f64 {
    if let Some(score) = input.quality_score {
        return score;
    }

    match (
        input.pii_completeness,
        input.disposition_accuracy,
        input.avg_freshness_days,
        input.coverage_percentage,
    ) {
        (Some(pii), Some(disposition), Some(freshness), Some(coverage))
            if pii != 0.0 && disposition != 0.0 && coverage != 0.0 =>
        {
            composite_from_submetrics(pii, disposition, freshness, coverage)
        }
        _ => DEFAULT_QUALITY_SCORE,
    }
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Map an uploaded header onto the canonical vendor schema.
///
/// Unknown headers pass through lowercased/trimmed so optional columns
/// (`quality_score`, `pii_completeness`, ...) match by their own names.
pub fn canonical_column(header: &str) -> String {
    let normalized = header.trim().to_lowercase();
    match normalized.as_str() {
        "name" | "vendor" | "company" => "vendor_name".to_string(),
        "cost" | "price" | "cost_per_rec" => "cost_per_record".to_string(),
        _ => normalized,
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Result of parsing an uploaded vendor spreadsheet.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedUpload {
    pub vendors: Vec<VendorInput>,
    pub columns_detected: Vec<String>,
}

/// Parse CSV bytes into vendor inputs.
///
/// Rows missing a vendor name or a parseable cost are skipped; a file that
/// yields no usable rows is a validation error, as is a missing required
/// column.
pub fn parse_vendor_csv(bytes: &[u8]) -> Result<ParsedUpload, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("File is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|_| CoreError::Validation("Could not parse file. Check format.".to_string()))?
        .iter()
        .map(canonical_column)
        .collect();

    let column_index = |name: &str| columns.iter().position(|c| c == name);

    let (Some(name_idx), Some(cost_idx)) = (
        column_index("vendor_name"),
        column_index("cost_per_record"),
    ) else {
        let missing: Vec<&str> = ["vendor_name", "cost_per_record"]
            .into_iter()
            .filter(|required| !columns.iter().any(|c| c == required))
            .collect();
        return Err(CoreError::Validation(format!(
            "Missing required columns: {missing:?}. Required: vendor_name, cost_per_record"
        )));
    };
    let quality_idx = column_index("quality_score");
    let pii_idx = column_index("pii_completeness");
    let disposition_idx = column_index("disposition_accuracy");
    let freshness_idx = column_index("avg_freshness_days");
    let coverage_idx = column_index("coverage_percentage");
    let description_idx = column_index("description");

    let field = |record: &csv::StringRecord, idx: Option<usize>| -> Option<String> {
        let value = record.get(idx?)?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    };
    let float_field = |record: &csv::StringRecord, idx: Option<usize>| -> Option<f64> {
        field(record, idx)?.parse().ok()
    };

    let mut vendors = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|_| CoreError::Validation("Could not parse file. Check format.".to_string()))?;

        let (Some(name), Some(cost)) = (
            field(&record, Some(name_idx)),
            float_field(&record, Some(cost_idx)),
        ) else {
            continue;
        };

        vendors.push(VendorInput {
            name,
            cost_per_record: cost,
            quality_score: float_field(&record, quality_idx),
            pii_completeness: float_field(&record, pii_idx),
            disposition_accuracy: float_field(&record, disposition_idx),
            avg_freshness_days: float_field(&record, freshness_idx),
            coverage_percentage: float_field(&record, coverage_idx),
            description: field(&record, description_idx),
        });
    }

    if vendors.is_empty() {
        return Err(CoreError::Validation(
            "No valid vendor data found in file".to_string(),
        ));
    }

    Ok(ParsedUpload {
        vendors,
        columns_detected: columns,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
