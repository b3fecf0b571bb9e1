//! Request-parameter validation shared by the HTTP handlers.
//!
//! The scoring and analytics functions never re-validate their inputs; the
//! contract ranges live here so every caller rejects bad parameters before
//! any computation or fetch happens.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Contract ranges
// ---------------------------------------------------------------------------

/// Listing limits accepted by the API.
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 1000;

/// Trailing-window sizes in days.
pub const MIN_WINDOW_DAYS: i64 = 1;
pub const MAX_WINDOW_DAYS: i64 = 365;

/// TCO projection horizon in years.
pub const MIN_TCO_YEARS: i64 = 1;
pub const MAX_TCO_YEARS: i64 = 10;

/// Stored-vendor comparison size.
pub const MIN_COMPARISON_VENDORS: usize = 2;
pub const MAX_COMPARISON_VENDORS: usize = 10;

/// Quick (ad-hoc) comparison size.
pub const MAX_QUICK_COMPARISON_VENDORS: usize = 20;

/// Minimum annual volume for recommendation projections.
pub const MIN_ANNUAL_VOLUME: i64 = 100;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Validate a listing limit (1-1000).
pub fn validate_limit(limit: i64) -> Result<(), CoreError> {
    validate_range(limit, MIN_LIMIT, MAX_LIMIT, "limit")
}

/// Validate a trailing window in days (1-365).
pub fn validate_window_days(days: i64) -> Result<(), CoreError> {
    validate_range(days, MIN_WINDOW_DAYS, MAX_WINDOW_DAYS, "days")
}

/// Validate a TCO horizon in years (1-10).
pub fn validate_tco_years(years: i64) -> Result<(), CoreError> {
    validate_range(years, MIN_TCO_YEARS, MAX_TCO_YEARS, "years")
}

/// Validate an annual record volume (strictly positive).
pub fn validate_annual_volume(volume: i64) -> Result<(), CoreError> {
    if volume <= 0 {
        return Err(CoreError::Validation(
            "annual_volume must be greater than 0".to_string(),
        ));
    }
    Ok(())
}

/// Validate the id list of a stored-vendor comparison: 2-10 vendors and no
/// duplicates.
pub fn validate_comparison_ids(vendor_ids: &[DbId]) -> Result<(), CoreError> {
    if vendor_ids.len() < MIN_COMPARISON_VENDORS {
        return Err(CoreError::Validation(
            "At least 2 vendors required for comparison".to_string(),
        ));
    }
    if vendor_ids.len() > MAX_COMPARISON_VENDORS {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_COMPARISON_VENDORS} vendors allowed for comparison"
        )));
    }
    let unique: HashSet<DbId> = vendor_ids.iter().copied().collect();
    if unique.len() != vendor_ids.len() {
        return Err(CoreError::Validation(
            "Duplicate vendor ids in comparison request".to_string(),
        ));
    }
    Ok(())
}

/// Validate the vendor count of a quick comparison (2-20).
pub fn validate_quick_comparison_count(count: usize) -> Result<(), CoreError> {
    if count < MIN_COMPARISON_VENDORS {
        return Err(CoreError::Validation(
            "At least 2 vendors required for comparison".to_string(),
        ));
    }
    if count > MAX_QUICK_COMPARISON_VENDORS {
        return Err(CoreError::Validation(format!(
            "Maximum {MAX_QUICK_COMPARISON_VENDORS} vendors allowed for quick comparison"
        )));
    }
    Ok(())
}

fn validate_range(value: i64, min: i64, max: i64, name: &str) -> Result<(), CoreError> {
    if value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Clamping (for parameters with defaults rather than hard rejections)
// ---------------------------------------------------------------------------

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_bounds() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(1000).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(1001).is_err());
    }

    #[test]
    fn window_bounds() {
        assert!(validate_window_days(1).is_ok());
        assert!(validate_window_days(365).is_ok());
        assert!(validate_window_days(0).is_err());
        assert!(validate_window_days(366).is_err());
    }

    #[test]
    fn tco_year_bounds() {
        assert!(validate_tco_years(1).is_ok());
        assert!(validate_tco_years(10).is_ok());
        assert!(validate_tco_years(0).is_err());
        assert!(validate_tco_years(11).is_err());
    }

    #[test]
    fn annual_volume_must_be_positive() {
        assert!(validate_annual_volume(1).is_ok());
        assert!(validate_annual_volume(0).is_err());
        assert!(validate_annual_volume(-10).is_err());
    }

    #[test]
    fn comparison_needs_two_to_ten_distinct_ids() {
        assert!(validate_comparison_ids(&[1]).is_err());
        assert!(validate_comparison_ids(&[1, 2]).is_ok());
        assert!(validate_comparison_ids(&(1..=10).collect::<Vec<_>>()).is_ok());
        assert!(validate_comparison_ids(&(1..=11).collect::<Vec<_>>()).is_err());
    }

    #[test]
    fn duplicate_comparison_ids_are_rejected() {
        assert!(validate_comparison_ids(&[1, 2, 1]).is_err());
    }

    #[test]
    fn quick_comparison_allows_up_to_twenty() {
        assert!(validate_quick_comparison_count(2).is_ok());
        assert!(validate_quick_comparison_count(20).is_ok());
        assert!(validate_quick_comparison_count(1).is_err());
        assert!(validate_quick_comparison_count(21).is_err());
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None, 50, 200), 50);
        assert_eq!(clamp_limit(Some(500), 50, 200), 200);
        assert_eq!(clamp_limit(Some(0), 50, 200), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(25)), 25);
    }
}
