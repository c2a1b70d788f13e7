//! Fitting the named model presets.

use slr_fit::FitResult;
use slr_series::Observations;
use slr_terms::build_design;
use tracing::debug;

use crate::error::ModelError;
use crate::kind::{ModelKind, ModelOptions};

/// Builds the design of `kind` from `obs` and fits it.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ModelError::Terms`] | response or wind column missing, or no complete rows |
/// | [`ModelError::Fit`] | singular design, too few rows, required convergence not reached |
#[tracing::instrument(skip_all, fields(model = %kind, quantity = options.quantity()))]
pub fn fit_model(
    obs: &Observations,
    kind: ModelKind,
    options: &ModelOptions,
) -> Result<FitResult, ModelError> {
    let design = build_design(obs, &kind.term_config(options))?;
    let fit = kind.fit_spec(options).fit(&design)?;
    debug!(
        nobs = fit.nobs(),
        rho = fit.rho(),
        aic = fit.aic(),
        "model fitted"
    );
    Ok(fit)
}

/// Quadratic trend with nodal cycle, fitted by OLS with nonrobust
/// covariance. Ignores the wind and AR switches.
pub fn linear_acceleration_model(
    obs: &Observations,
    options: &ModelOptions,
) -> Result<FitResult, ModelError> {
    fit_model(obs, ModelKind::LinearAcceleration, options)
}

/// Constant sea-level rise.
pub fn linear_model(obs: &Observations, options: &ModelOptions) -> Result<FitResult, ModelError> {
    fit_model(obs, ModelKind::Linear, options)
}

/// Linear trend with an additional rate after the configured break year.
pub fn broken_linear_model(
    obs: &Observations,
    options: &ModelOptions,
) -> Result<FitResult, ModelError> {
    fit_model(obs, options.broken_linear(), options)
}

/// Accelerating sea-level rise over the whole record.
pub fn quadratic_model(
    obs: &Observations,
    options: &ModelOptions,
) -> Result<FitResult, ModelError> {
    fit_model(obs, ModelKind::Quadratic, options)
}

/// Sea-level rise accelerating from the configured start year.
pub fn broken_quadratic_model(
    obs: &Observations,
    options: &ModelOptions,
) -> Result<FitResult, ModelError> {
    fit_model(obs, options.broken_quadratic(), options)
}
