//! Error types for the slr-calendar crate.

/// Error type for all fallible operations in the slr-calendar crate.
///
/// Covers non-finite year values, invalid month numbers and years that
/// fall outside the range representable by the Gregorian calendar types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a year value is NaN or infinite.
    #[error("year value is not finite: {year}")]
    NonFiniteYear {
        /// The offending year value.
        year: f64,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Returned when a year cannot be represented as a calendar date.
    #[error("year {year} is outside the supported calendar range")]
    OutOfRange {
        /// The whole year that could not be represented.
        year: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite_year() {
        let err = CalendarError::NonFiniteYear { year: f64::NAN };
        assert_eq!(err.to_string(), "year value is not finite: NaN");
    }

    #[test]
    fn error_invalid_month() {
        let err = CalendarError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }

    #[test]
    fn error_out_of_range() {
        let err = CalendarError::OutOfRange { year: 1_000_000 };
        assert_eq!(
            err.to_string(),
            "year 1000000 is outside the supported calendar range"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<CalendarError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<CalendarError>();
    }
}
