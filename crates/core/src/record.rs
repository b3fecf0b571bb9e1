//! Record-level quality classification types.
//!
//! A delivered record carries three PII presence flags and a verification
//! flag; the derived [`PiiStatus`] drives the completeness metric in
//! [`crate::scoring`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PII status
// ---------------------------------------------------------------------------

/// Derived PII completeness classification for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiStatus {
    /// Date of birth, SSN, and full name are all present.
    Complete,
    /// At least one of the three identifiers is present, but not all.
    Incomplete,
    /// None of the three identifiers are present.
    Missing,
}

impl PiiStatus {
    /// Derive the status from the three presence flags.
    ///
    /// The `incomplete` band covers *any* subset short of all three -- a
    /// record with only a full name is incomplete, not missing. Downstream
    /// consumers depend on this exact boundary.
    pub fn from_flags(has_dob: bool, has_ssn: bool, has_full_name: bool) -> Self {
        let present = [has_dob, has_ssn, has_full_name]
            .iter()
            .filter(|&&f| f)
            .count();
        match present {
            3 => Self::Complete,
            0 => Self::Missing,
            _ => Self::Incomplete,
        }
    }

    /// Status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Incomplete => "incomplete",
            Self::Missing => "missing",
        }
    }

    /// Parse the database representation. Unknown strings map to `Missing`
    /// so a malformed row degrades the metric instead of failing the fetch.
    pub fn parse_str(s: &str) -> Self {
        match s {
            "complete" => Self::Complete,
            "incomplete" => Self::Incomplete,
            _ => Self::Missing,
        }
    }
}

// ---------------------------------------------------------------------------
// Disposition type
// ---------------------------------------------------------------------------

/// Court disposition classification reported by the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispositionType {
    Felony,
    Misdemeanor,
    Dismissed,
    Pending,
}

impl DispositionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Felony => "felony",
            Self::Misdemeanor => "misdemeanor",
            Self::Dismissed => "dismissed",
            Self::Pending => "pending",
        }
    }

    pub const ALL: [DispositionType; 4] = [
        Self::Felony,
        Self::Misdemeanor,
        Self::Dismissed,
        Self::Pending,
    ];
}

// ---------------------------------------------------------------------------
// Scoring view
// ---------------------------------------------------------------------------

/// The slice of a delivered record the scoring engine actually reads.
///
/// Built by the repository layer from `criminal_records` rows; keeping it
/// narrow means the engine never touches PII payload fields.
#[derive(Debug, Clone, Copy)]
pub struct RecordQuality {
    pub pii_status: PiiStatus,
    pub disposition_verified: bool,
    /// Days between court filing and vendor delivery.
    pub freshness_days: f64,
    /// Hours between court filing and vendor delivery.
    pub turnaround_hours: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_flags_present_is_complete() {
        assert_eq!(PiiStatus::from_flags(true, true, true), PiiStatus::Complete);
    }

    #[test]
    fn no_flags_present_is_missing() {
        assert_eq!(PiiStatus::from_flags(false, false, false), PiiStatus::Missing);
    }

    #[test]
    fn any_single_flag_is_incomplete() {
        // The boundary is any-but-not-all, not a majority vote: a lone
        // full name still counts as incomplete.
        assert_eq!(
            PiiStatus::from_flags(true, false, false),
            PiiStatus::Incomplete
        );
        assert_eq!(
            PiiStatus::from_flags(false, true, false),
            PiiStatus::Incomplete
        );
        assert_eq!(
            PiiStatus::from_flags(false, false, true),
            PiiStatus::Incomplete
        );
    }

    #[test]
    fn two_flags_are_incomplete() {
        assert_eq!(
            PiiStatus::from_flags(true, true, false),
            PiiStatus::Incomplete
        );
        assert_eq!(
            PiiStatus::from_flags(true, false, true),
            PiiStatus::Incomplete
        );
    }

    #[test]
    fn status_round_trips_through_db_strings() {
        for status in [PiiStatus::Complete, PiiStatus::Incomplete, PiiStatus::Missing] {
            assert_eq!(PiiStatus::parse_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_string_degrades_to_missing() {
        assert_eq!(PiiStatus::parse_str("corrupted"), PiiStatus::Missing);
    }
}
