//! Estimator specification (unfitted).

use std::fmt;

use serde::Serialize;
use slr_terms::DesignMatrix;

use crate::error::FitError;
use crate::fit::FitResult;

/// Covariance estimator reported with a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CovType {
    /// `scale · (X'X)⁻¹`, Student-t inference.
    NonRobust,
    /// White's heteroskedasticity-consistent sandwich, normal inference.
    Hc0,
}

impl fmt::Display for CovType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CovType::NonRobust => f.write_str("nonrobust"),
            CovType::Hc0 => f.write_str("HC0"),
        }
    }
}

/// Options of the AR(1) Cochrane–Orcutt refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlsarOptions {
    rho_init: f64,
    max_iterations: usize,
    tolerance: f64,
    require_convergence: bool,
}

impl GlsarOptions {
    /// Default options: start at rho 0, at most 50 refinements, stop when
    /// rho and the relative coefficient change both fall below `1e-4`.
    pub fn new() -> Self {
        Self {
            rho_init: 0.0,
            max_iterations: 50,
            tolerance: 1e-4,
            require_convergence: false,
        }
    }

    /// The historical bound of three least-squares passes (two rho updates).
    pub fn legacy() -> Self {
        Self::new().with_max_iterations(2)
    }

    pub fn with_rho_init(mut self, rho_init: f64) -> Self {
        self.rho_init = rho_init;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Turns non-convergence into [`FitError::NonConvergence`] instead of a
    /// warning.
    pub fn with_require_convergence(mut self, require: bool) -> Self {
        self.require_convergence = require;
        self
    }

    pub fn rho_init(&self) -> f64 {
        self.rho_init
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn require_convergence(&self) -> bool {
        self.require_convergence
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<(), FitError> {
        if !self.rho_init.is_finite() || self.rho_init.abs() >= 1.0 {
            return Err(FitError::InvalidOptions {
                reason: format!("rho_init must lie in (-1, 1), got {}", self.rho_init),
            });
        }
        if self.max_iterations == 0 {
            return Err(FitError::InvalidOptions {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(FitError::InvalidOptions {
                reason: format!("tolerance must be finite and > 0, got {}", self.tolerance),
            });
        }
        Ok(())
    }
}

impl Default for GlsarOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Point estimator of the regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    /// Ordinary least squares.
    Ols,
    /// Generalised least squares with AR(1) errors.
    GlsAr1(GlsarOptions),
}

impl Estimator {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Estimator::Ols => "OLS",
            Estimator::GlsAr1(_) => "GLSAR",
        }
    }
}

/// An unfitted regression: estimator plus covariance kind.
///
/// ```mermaid
/// graph LR
///     A["FitSpec::glsar(opts, CovType::Hc0)"] -->|".fit(&design)?"| B["FitResult"]
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSpec {
    estimator: Estimator,
    cov_type: CovType,
}

impl FitSpec {
    pub fn new(estimator: Estimator, cov_type: CovType) -> Self {
        Self {
            estimator,
            cov_type,
        }
    }

    /// Ordinary least squares.
    pub fn ols(cov_type: CovType) -> Self {
        Self::new(Estimator::Ols, cov_type)
    }

    /// AR(1) generalised least squares.
    pub fn glsar(options: GlsarOptions, cov_type: CovType) -> Self {
        Self::new(Estimator::GlsAr1(options), cov_type)
    }

    pub fn estimator(&self) -> Estimator {
        self.estimator
    }

    pub fn cov_type(&self) -> CovType {
        self.cov_type
    }

    /// Fits the regression described by `design`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FitError::InvalidOptions`] | GLSAR options fail validation |
    /// | [`FitError::NonFiniteData`] | NaN or infinity in the design or response |
    /// | [`FitError::InsufficientData`] | fewer than `p + 1` rows (`p + 2` for GLSAR) |
    /// | [`FitError::SingularMatrix`] | the regressors are collinear |
    /// | [`FitError::NonConvergence`] | refinement did not settle and convergence is required |
    pub fn fit(&self, design: &DesignMatrix) -> Result<FitResult, FitError> {
        crate::estimate::fit_design(design, self)
    }
}
