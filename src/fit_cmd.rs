//! Fit command: one model on one station.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span, warn};

use slr_effects::{Scenario, predict_scenario, tide_effect, wind_effect_and_anomaly};
use slr_fit::FitResult;
use slr_models::{ModelKind, ModelSummary, PredictionSummary, fit_model};
use slr_terms::Term;

use crate::cli::FitArgs;
use crate::config::SlrConfig;
use crate::convert;
use crate::input::load_station;
use crate::report::write_json;

/// Per-row contributions of the forcing terms.
#[derive(Debug, Serialize)]
struct Decomposition {
    years: Vec<f64>,
    tide_effect: Option<Vec<f64>>,
    wind_effect: Option<Vec<f64>>,
    wind_anomaly: Option<Vec<f64>>,
}

impl Decomposition {
    fn new(fit: &FitResult) -> Result<Self> {
        let design = fit.design();
        let tide_effect = if design.contains(Term::NodalU) {
            Some(tide_effect(fit)?.to_vec())
        } else {
            None
        };
        let (wind_effect, wind_anomaly) = if design.contains(Term::WindU2) {
            let wind = wind_effect_and_anomaly(fit)?;
            (Some(wind.effect.to_vec()), Some(wind.anomaly.to_vec()))
        } else {
            (None, None)
        };
        Ok(Self {
            years: design.years().to_vec(),
            tide_effect,
            wind_effect,
            wind_anomaly,
        })
    }
}

#[derive(Debug, Serialize)]
struct FitReport {
    station: String,
    model: ModelKind,
    summary: ModelSummary,
    fitted: PredictionSummary,
    decomposition: Decomposition,
}

fn station_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the single-model fit.
pub fn run(args: FitArgs) -> Result<()> {
    let _cmd = info_span!("fit").entered();
    // 1. Load project TOML
    let config = SlrConfig::load(&args.config)?;
    let options = convert::build_model_options(&config.model, &config.glsar, &config.io.quantity)?;
    let model_name = args.model.as_deref().unwrap_or(&config.model.name);
    let kind = convert::parse_model(model_name, &options)?;

    // 2. Read the station with its forcing
    let input = args
        .input
        .as_ref()
        .or(config.io.input.as_ref())
        .ok_or_else(|| anyhow!("no input path: set [io].input in config or use --input"))?;
    let obs = load_station(input, &config.io)?;

    // 3. Fit
    let fit = fit_model(&obs, kind, &options).with_context(|| format!("failed to fit {kind}"))?;
    if !fit.converged() {
        warn!(
            iterations = fit.iterations(),
            rho = fit.rho(),
            "AR(1) refinement stopped before convergence"
        );
    }
    info!(model = %kind, nobs = fit.nobs(), aic = fit.aic(), "model fitted");

    // 4. Report
    let alpha = options.alpha();
    let fitted = predict_scenario(&fit, &Scenario::new())?;
    let report = FitReport {
        station: station_name(input),
        model: kind,
        summary: ModelSummary::from_fit(kind.name(), &fit, alpha)?,
        fitted: PredictionSummary::new(fit.design().years().to_vec(), &fitted, alpha)?,
        decomposition: Decomposition::new(&fit)?,
    };
    let output = args.output.as_ref().or(config.io.output.as_ref());
    write_json(&report, output.map(|p| p.as_path()))
}
