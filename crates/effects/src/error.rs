//! Error types for effect decomposition.

use slr_fit::FitError;

/// Errors raised while decomposing or re-evaluating a fit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EffectError {
    /// The fit does not contain a term the operation needs.
    #[error("model has no '{term}' term")]
    MissingTerm { term: String },

    /// A series and an effect differ in length.
    #[error("length mismatch: series has {got} values, effect has {expected}")]
    LengthMismatch { expected: usize, got: usize },

    /// Re-evaluating the fit failed.
    #[error(transparent)]
    Fit(#[from] FitError),
}
