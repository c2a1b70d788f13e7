//! Serialisable report structures.

use serde::Serialize;
use slr_fit::{CovType, FTest, FitResult, ParamEstimate, Prediction};

use crate::compare::{ModelComparison, RollingMean};
use crate::error::ModelError;

/// Coefficient table and diagnostics of one fit.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub model: String,
    pub estimator: &'static str,
    pub cov_type: CovType,
    pub quantity: String,
    pub nobs: usize,
    pub n_dropped: usize,
    pub df_resid: usize,
    pub rho: f64,
    pub iterations: usize,
    pub converged: bool,
    pub r_squared: f64,
    pub llf: f64,
    pub aic: f64,
    pub bic: f64,
    pub f_test: Option<FTest>,
    pub params: Vec<ParamEstimate>,
}

impl ModelSummary {
    /// Summarises `fit` with intervals at level `1 - alpha`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Fit`] for an invalid `alpha`.
    pub fn from_fit(
        model: impl Into<String>,
        fit: &FitResult,
        alpha: f64,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            model: model.into(),
            estimator: fit.spec().estimator().name(),
            cov_type: fit.cov_type(),
            quantity: fit.design().quantity().to_string(),
            nobs: fit.nobs(),
            n_dropped: fit.n_dropped(),
            df_resid: fit.df_resid(),
            rho: fit.rho(),
            iterations: fit.iterations(),
            converged: fit.converged(),
            r_squared: fit.r_squared(),
            llf: fit.llf(),
            aic: fit.aic(),
            bic: fit.bic(),
            f_test: fit.f_test(),
            params: fit.summary(alpha)?,
        })
    }
}

/// Point prediction with confidence and prediction bands.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionSummary {
    pub years: Vec<f64>,
    pub mean: Vec<f64>,
    pub ci_lower: Vec<f64>,
    pub ci_upper: Vec<f64>,
    pub pi_lower: Vec<f64>,
    pub pi_upper: Vec<f64>,
}

impl PredictionSummary {
    /// Tabulates `prediction` against the year stamps of its rows.
    ///
    /// # Errors
    ///
    /// [`ModelError::Fit`] for an invalid `alpha`.
    pub fn new(years: Vec<f64>, prediction: &Prediction, alpha: f64) -> Result<Self, ModelError> {
        let ci = prediction.conf_int(false, alpha)?;
        let pi = prediction.conf_int(true, alpha)?;
        Ok(Self {
            years,
            mean: prediction.mean().to_vec(),
            ci_lower: ci.column(0).to_vec(),
            ci_upper: ci.column(1).to_vec(),
            pi_lower: pi.column(0).to_vec(),
            pi_upper: pi.column(1).to_vec(),
        })
    }
}

/// Report of a [`ModelComparison`].
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub station: Option<String>,
    pub alpha: f64,
    pub models: Vec<ModelSummary>,
    pub prediction: Option<PredictionSummary>,
    pub prediction_mean_wind_zero_tide: Option<PredictionSummary>,
    pub rolling: Vec<RollingMean>,
}

impl ComparisonSummary {
    /// Summarises every member of `comparison`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Fit`] for an invalid `alpha`.
    pub fn new(
        station: Option<String>,
        comparison: &ModelComparison,
        alpha: f64,
    ) -> Result<Self, ModelError> {
        let models = comparison
            .models
            .iter()
            .map(|m| ModelSummary::from_fit(m.name, &m.fit, alpha))
            .collect::<Result<Vec<_>, _>>()?;

        let (mut prediction, mut prediction_mean_wind_zero_tide) = (None, None);
        let reference = comparison
            .models
            .iter()
            .find_map(|m| m.predictions.as_ref().map(|p| (m, p)));
        if let Some((member, p)) = reference {
            let years = member.fit.design().years().to_vec();
            prediction = Some(PredictionSummary::new(years.clone(), &p.actual, alpha)?);
            prediction_mean_wind_zero_tide =
                Some(PredictionSummary::new(years, &p.mean_wind_zero_tide, alpha)?);
        }

        Ok(Self {
            station,
            alpha,
            models,
            prediction,
            prediction_mean_wind_zero_tide,
            rolling: comparison.rolling.clone(),
        })
    }
}
