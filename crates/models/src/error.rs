//! Error types for model presets and comparisons.

use slr_effects::EffectError;
use slr_fit::FitError;
use slr_series::SeriesError;
use slr_terms::TermError;

/// Errors raised while fitting a model preset or comparing models.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// A comparison failed for one station.
    #[error("station '{station}': {source}")]
    Station {
        station: String,
        source: Box<ModelError>,
    },

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Terms(#[from] TermError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error(transparent)]
    Effects(#[from] EffectError),
}
