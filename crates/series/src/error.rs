//! Error types for observation series.

use slr_calendar::CalendarError;

/// Errors raised while building or querying an [`Observations`](crate::Observations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// A year value is NaN or infinite.
    #[error("year at row {index} is not finite: {year}")]
    NonFiniteYear { index: usize, year: f64 },

    /// The year axis decreases between two consecutive rows.
    #[error("years are not in time order at row {index}")]
    UnorderedYears { index: usize },

    /// A column does not have the length of the year axis.
    #[error("column '{column}' has {got} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    /// A column name is already taken.
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    /// A requested column does not exist.
    #[error("missing column '{name}'")]
    MissingColumn { name: String },

    /// A row index passed to a selection is past the end of the series.
    #[error("row index {index} out of bounds for series of length {len}")]
    RowOutOfBounds { index: usize, len: usize },

    /// Converting the year axis to calendar dates failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_names_the_column() {
        let err = SeriesError::MissingColumn {
            name: "surge".to_string(),
        };
        assert_eq!(err.to_string(), "missing column 'surge'");
    }

    #[test]
    fn length_mismatch_display() {
        let err = SeriesError::LengthMismatch {
            column: "u2".to_string(),
            expected: 10,
            got: 9,
        };
        assert_eq!(err.to_string(), "column 'u2' has 9 values, expected 10");
    }

    #[test]
    fn calendar_error_is_transparent() {
        let err: SeriesError = CalendarError::InvalidMonth { month: 13 }.into();
        assert_eq!(err.to_string(), "invalid month: 13 (must be 1..=12)");
    }
}
