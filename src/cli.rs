use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sea-level trend estimation from tide-gauge records.
#[derive(Parser)]
#[command(
    name = "slr",
    version,
    about = "Sea-level trends with wind and nodal-tide corrections"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit one trend model to a station series.
    Fit(FitArgs),
    /// Fit all model families side by side.
    Compare(CompareArgs),
}

/// Arguments for the `fit` subcommand.
#[derive(clap::Args)]
pub struct FitArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "slr.toml")]
    pub config: PathBuf,

    /// Override the station CSV from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Model to fit (linear, linear_acceleration, broken_linear, quadratic, broken_quadratic).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "slr.toml")]
    pub config: PathBuf,

    /// Station CSV files; repeat for several stations.
    #[arg(short, long)]
    pub input: Vec<PathBuf>,

    /// Compare the mean of all stations, from `[io].min_year` on, instead of
    /// each station.
    #[arg(long)]
    pub station_mean: bool,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
