//! Error types for design-matrix construction.

/// Errors raised while building a [`DesignMatrix`](crate::DesignMatrix).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TermError {
    /// A column required by the response or a regressor is absent.
    #[error("missing column '{name}'")]
    MissingColumn { name: String },

    /// Matrix, response and row metadata disagree in size.
    #[error("{what} has length {got}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// The same term or label appears twice.
    #[error("duplicate term '{label}'")]
    DuplicateTerm { label: String },

    /// Every row had a missing value.
    #[error("no complete observations ({dropped} rows dropped)")]
    NoObservations { dropped: usize },
}
