//! Error types for forcing preparation.

use slr_calendar::CalendarError;
use slr_series::SeriesError;

/// Errors raised while preparing or joining forcing series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForcingError {
    /// Two inputs that must be parallel differ in length.
    #[error("{what}: expected {expected} values, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// An input series has no rows.
    #[error("{what} is empty")]
    EmptySeries { what: &'static str },

    /// Two wind products share fewer than two time steps.
    #[error("wind products overlap in {rows} rows, need at least 2")]
    NoOverlap { rows: usize },

    /// Annual forcing cannot supply monthly observations.
    #[error("{what} is annual but the observations are monthly")]
    ResolutionMismatch { what: &'static str },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_display() {
        let err = ForcingError::LengthMismatch {
            what: "v component",
            expected: 12,
            got: 11,
        };
        assert_eq!(err.to_string(), "v component: expected 12 values, got 11");
    }

    #[test]
    fn no_overlap_display() {
        let err = ForcingError::NoOverlap { rows: 1 };
        assert_eq!(err.to_string(), "wind products overlap in 1 rows, need at least 2");
    }

    #[test]
    fn resolution_mismatch_display() {
        let err = ForcingError::ResolutionMismatch { what: "wind" };
        assert_eq!(err.to_string(), "wind is annual but the observations are monthly");
    }

    #[test]
    fn series_error_converts() {
        let err: ForcingError = SeriesError::MissingColumn {
            name: "height".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "missing column 'height'");
    }
}
