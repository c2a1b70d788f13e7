//! # slr-effects
//!
//! Decomposes a fitted sea-level model into the contributions of its terms
//! and evaluates the model under counterfactual forcing.
//!
//! ```mermaid
//! graph LR
//!     A["FitResult"] -->|"tide_effect()?"| B["nodal contribution"]
//!     A -->|"wind_effect_and_anomaly()?"| C["WindEffect"]
//!     A -->|"predict_scenario(&fit, &Scenario::mean_wind())?"| D["Prediction"]
//! ```
//!
//! All functions are pure: they read the coefficients and the fitted design
//! columns and never modify the fit.

mod decompose;
mod error;
mod scenario;

pub use decompose::{
    Correction, WindEffect, corrected_series, subtract_effect, term_effect, tide_effect,
    wind_effect_and_anomaly,
};
pub use error::EffectError;
pub use scenario::{Adjustment, Scenario, counterfactual_design, predict_scenario};
