//! # slr-models
//!
//! Named sea-level trend models and their side-by-side comparison.
//!
//! Each preset maps a [`ModelKind`] and [`ModelOptions`] to a term set
//! ([`slr_terms::TermConfig`]) and an estimator ([`slr_fit::FitSpec`]):
//!
//! | Model | Trend terms | Estimator (`with_ar` / not) |
//! |-------|-------------|-----------------------------|
//! | `linear_acceleration` | trend, acceleration | OLS nonrobust |
//! | `linear` | trend | GLSAR HC0 / OLS HC0 |
//! | `broken_linear` | trend, `+trend` after 1993 | GLSAR HC0 / OLS HC0 |
//! | `quadratic` | trend, acceleration | GLSAR HC0 / OLS HC0 |
//! | `broken_quadratic` | trend, acceleration from 1960 | GLSAR HC0 / OLS HC0 |
//!
//! ```mermaid
//! graph LR
//!     A["Observations"] -->|"fit_model(&obs, kind, &opts)?"| B["FitResult"]
//!     A -->|"compare_models(&obs, &opts)?"| C["ModelComparison"]
//!     C -->|"ComparisonSummary::new()"| D["serde report"]
//! ```

mod compare;
mod error;
mod kind;
mod presets;
mod summary;

pub use compare::{
    ComparedModel, ComparisonPredictions, ModelComparison, ROLLING_WINDOWS, RollingMean,
    compare_models, compare_stations,
};
pub use error::ModelError;
pub use kind::{DEFAULT_BREAK_YEAR, DEFAULT_START_ACCELERATION, ModelKind, ModelOptions};
pub use presets::{
    broken_linear_model, broken_quadratic_model, fit_model, linear_acceleration_model,
    linear_model, quadratic_model,
};
pub use summary::{ComparisonSummary, ModelSummary, PredictionSummary};
