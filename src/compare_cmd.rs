//! Compare command: all model families on one or more stations.

use std::path::PathBuf;

use anyhow::{Result, bail};
use tracing::{info, info_span};

use slr_forcing::station_mean;
use slr_models::{ComparisonSummary, compare_models, compare_stations};
use slr_series::Observations;

use crate::cli::CompareArgs;
use crate::config::SlrConfig;
use crate::convert;
use crate::input::load_station;
use crate::report::write_json;

/// Columns present in every station, in the order of the first one.
fn common_columns(stations: &[(String, Observations)]) -> Vec<String> {
    let Some((_, first)) = stations.first() else {
        return Vec::new();
    };
    first
        .column_names()
        .into_iter()
        .filter(|c| stations.iter().all(|(_, obs)| obs.has_column(c)))
        .map(str::to_string)
        .collect()
}

/// Run the model comparison.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();
    // 1. Load project TOML
    let config = SlrConfig::load(&args.config)?;
    let options = convert::build_model_options(&config.model, &config.glsar, &config.io.quantity)?;

    // 2. Read stations
    let inputs: Vec<PathBuf> = if args.input.is_empty() {
        config.io.input.iter().cloned().collect()
    } else {
        args.input.clone()
    };
    if inputs.is_empty() {
        bail!("no input path: set [io].input in config or use --input");
    }
    let stations = inputs
        .iter()
        .map(|p| {
            let name = p
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string());
            Ok((name, load_station(p, &config.io)?))
        })
        .collect::<Result<Vec<_>>>()?;

    // 3. Compare
    let alpha = options.alpha();
    let output = args.output.as_ref().or(config.io.output.as_ref());
    let output = output.map(|p| p.as_path());
    if args.station_mean {
        // also for a single station, so that `min_year` applies
        let columns = common_columns(&stations);
        let refs: Vec<&str> = columns.iter().map(String::as_str).collect();
        let series: Vec<Observations> = stations.into_iter().map(|(_, obs)| obs).collect();
        let mean = station_mean(&series, &refs, config.io.min_year)?;
        info!(stations = series.len(), rows = mean.len(), "station mean");
        let comparison = compare_models(&mean, &options)?;
        let summary = ComparisonSummary::new(Some("station mean".to_string()), &comparison, alpha)?;
        write_json(&summary, output)
    } else if let [(name, obs)] = stations.as_slice() {
        let comparison = compare_models(obs, &options)?;
        let summary = ComparisonSummary::new(Some(name.clone()), &comparison, alpha)?;
        write_json(&summary, output)
    } else {
        let summaries = compare_stations(&stations, &options)?
            .iter()
            .map(|(name, cmp)| ComparisonSummary::new(Some(name.clone()), cmp, alpha))
            .collect::<Result<Vec<_>, _>>()?;
        write_json(&summaries, output)
    }
}
