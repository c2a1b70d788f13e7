//! # slr-fit
//!
//! Linear regression for sea-level trend models: ordinary least squares and
//! AR(1) generalised least squares (GLSAR), with classical or HC0 robust
//! coefficient covariance.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["DesignMatrix"] --> B["FitSpec::new(estimator, cov_type)"]
//!     B -->|".fit(&design)?"| C["FitResult"]
//!     C --> D[".summary(alpha)?: coefficient table"]
//!     C --> E[".get_prediction(&exog)?: Prediction"]
//!     C --> F[".rho() / .converged(): AR(1) refinement"]
//! ```
//!
//! ## Estimators
//!
//! **OLS**: SVD pseudo-inverse of the design.
//!
//! **GLSAR**: bounded Cochrane–Orcutt iteration. Each pass whitens the
//! system with `z[t] - rho·z[t-1]` (dropping the first row), solves it, and
//! re-estimates rho by Yule–Walker from the unwhitened residuals.
//!
//! ## Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | b | [`FitResult::params()`] | Coefficients, in design-column order |
//! | V | [`FitResult::cov_params()`] | Coefficient covariance ([`CovType`]) |
//! | rho | [`FitResult::rho()`] | AR(1) coefficient of the errors |
//! | scale | [`FitResult::scale()`] | `SSR / df_resid` |
//! | llf | [`FitResult::llf()`] | Gaussian log-likelihood |

mod covariance;
mod error;
mod estimate;
mod fit;
mod glsar;
mod linalg;
mod prediction;
mod spec;

pub use error::FitError;
pub use fit::{FTest, FitResult, ParamEstimate};
pub use prediction::{InferenceDistribution, Prediction};
pub use spec::{CovType, Estimator, FitSpec, GlsarOptions};
