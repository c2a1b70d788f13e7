//! Fitting the model families side by side.

use rayon::prelude::*;
use serde::Serialize;
use slr_effects::{Scenario, predict_scenario};
use slr_fit::{FitResult, Prediction};
use slr_series::Observations;
use slr_stats::rolling_mean_centered;
use tracing::info;

use crate::error::ModelError;
use crate::kind::{ModelKind, ModelOptions};
use crate::presets::fit_model;

/// Windows (years) of the centred rolling means reported with a comparison.
pub const ROLLING_WINDOWS: [usize; 2] = [18, 7];

/// Predictions attached to the reference model of a comparison.
#[derive(Debug, Clone)]
pub struct ComparisonPredictions {
    /// Fitted values with actual forcing.
    pub actual: Prediction,
    /// Wind held at its mean and nodal tide removed.
    pub mean_wind_zero_tide: Prediction,
}

/// One fitted member of a comparison.
#[derive(Debug, Clone)]
pub struct ComparedModel {
    pub name: &'static str,
    pub kind: ModelKind,
    pub fit: FitResult,
    pub predictions: Option<ComparisonPredictions>,
}

/// Centred rolling mean of the response, `NaN` where the window is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RollingMean {
    pub window: usize,
    pub values: Vec<f64>,
}

/// All members of a comparison for one series.
#[derive(Debug, Clone)]
pub struct ModelComparison {
    pub years: Vec<f64>,
    pub observed: Vec<f64>,
    pub models: Vec<ComparedModel>,
    pub rolling: Vec<RollingMean>,
}

impl ModelComparison {
    /// Looks up a member by name.
    pub fn get(&self, name: &str) -> Option<&ComparedModel> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Predictions of the reference (`linear_with_wind`) model.
    pub fn reference_predictions(&self) -> Option<&ComparisonPredictions> {
        self.models.iter().find_map(|m| m.predictions.as_ref())
    }
}

struct Job {
    name: &'static str,
    kind: ModelKind,
    options: ModelOptions,
    predict: bool,
}

fn jobs(options: &ModelOptions) -> Vec<Job> {
    let job = |name, kind, options: ModelOptions, predict| Job {
        name,
        kind,
        options,
        predict,
    };
    vec![
        job("linear_with_wind", ModelKind::Linear, options.clone(), true),
        job(
            "linear_without_wind",
            ModelKind::Linear,
            options.clone().with_wind(false),
            false,
        ),
        job("broken_linear", options.broken_linear(), options.clone(), false),
        job("quadratic", ModelKind::Quadratic, options.clone(), false),
        job("broken_quadratic", options.broken_quadratic(), options.clone(), false),
    ]
}

/// Mean wind and zero tide, restricted to the terms the fit carries.
fn reference_scenario(fit: &FitResult) -> Scenario {
    Scenario::mean_wind_zero_tide()
        .adjustments()
        .iter()
        .filter(|(term, _)| fit.design().contains(*term))
        .fold(Scenario::new(), |s, &(term, adj)| s.with(term, adj))
}

fn run(obs: &Observations, job: &Job) -> Result<ComparedModel, ModelError> {
    let fit = fit_model(obs, job.kind, &job.options)?;
    let predictions = if job.predict {
        Some(ComparisonPredictions {
            actual: predict_scenario(&fit, &Scenario::new())?,
            mean_wind_zero_tide: predict_scenario(&fit, &reference_scenario(&fit))?,
        })
    } else {
        None
    };
    Ok(ComparedModel {
        name: job.name,
        kind: job.kind,
        fit,
        predictions,
    })
}

/// Fits the linear (with and without wind), broken-linear, quadratic and
/// broken-quadratic models to `obs` in parallel.
///
/// The `linear_with_wind` member carries predictions with actual forcing
/// and with mean wind and no nodal tide. When `options` disables wind or
/// nodal terms the corresponding adjustment is skipped.
///
/// # Errors
///
/// The first [`ModelError`] raised by any member fit.
pub fn compare_models(
    obs: &Observations,
    options: &ModelOptions,
) -> Result<ModelComparison, ModelError> {
    let models = jobs(options)
        .par_iter()
        .map(|job| run(obs, job))
        .collect::<Result<Vec<_>, _>>()?;

    let observed = obs.column(options.quantity())?.to_vec();
    let rolling = ROLLING_WINDOWS
        .iter()
        .map(|&window| RollingMean {
            window,
            values: rolling_mean_centered(&observed, window),
        })
        .collect();

    Ok(ModelComparison {
        years: obs.years().to_vec(),
        observed,
        models,
        rolling,
    })
}

/// Runs [`compare_models`] for every named station in parallel.
///
/// # Errors
///
/// [`ModelError::Station`] wrapping the first failure, with the station name.
pub fn compare_stations(
    stations: &[(String, Observations)],
    options: &ModelOptions,
) -> Result<Vec<(String, ModelComparison)>, ModelError> {
    let out = stations
        .par_iter()
        .map(|(name, obs)| {
            compare_models(obs, options)
                .map(|c| (name.clone(), c))
                .map_err(|e| ModelError::Station {
                    station: name.clone(),
                    source: Box::new(e),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    info!(stations = out.len(), "stations compared");
    Ok(out)
}
