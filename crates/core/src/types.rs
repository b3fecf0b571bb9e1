/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Round a metric to two decimal places for externally visible fields.
///
/// Raw intermediate values (counts, unrounded sums) are never rounded;
/// only the numbers that cross the API boundary go through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (used by a few summary fields).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(86.666_666), 86.67);
    }

    #[test]
    fn round2_preserves_exact_values() {
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn round1_basic() {
        assert_eq!(round1(88.44), 88.4);
        assert_eq!(round1(88.45), 88.5);
    }
}
