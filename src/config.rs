use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SlrConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Model settings.
    #[serde(default)]
    pub model: ModelToml,

    /// AR(1) refinement settings.
    #[serde(default)]
    pub glsar: GlsarToml,
}

impl SlrConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Wind products (`year,u,v`), oldest first; later products take precedence.
    #[serde(default)]
    pub wind: Vec<PathBuf>,
    /// Modelled surge (`year,surge` in metres).
    pub surge: Option<PathBuf>,
    #[serde(default = "default_quantity")]
    pub quantity: String,
    #[serde(default = "default_year_column")]
    pub year_column: String,
    /// First year kept when averaging stations.
    #[serde(default = "default_min_year")]
    pub min_year: f64,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            wind: Vec::new(),
            surge: None,
            quantity: default_quantity(),
            year_column: default_year_column(),
            min_year: default_min_year(),
        }
    }
}

fn default_quantity() -> String {
    "height".to_string()
}
fn default_year_column() -> String {
    "year".to_string()
}
fn default_min_year() -> f64 {
    1890.0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Model used by `slr fit` when `--model` is not given.
    #[serde(default = "default_model")]
    pub name: String,
    #[serde(default = "default_true")]
    pub with_wind: bool,
    #[serde(default = "default_true")]
    pub with_ar: bool,
    #[serde(default = "default_true")]
    pub with_nodal: bool,
    #[serde(default = "default_epoch")]
    pub epoch: i32,
    #[serde(default = "default_break_year")]
    pub break_year: i32,
    #[serde(default = "default_start_acceleration")]
    pub start_acceleration: i32,
    /// `nonrobust` or `hc0`; per-model default when absent.
    #[serde(default)]
    pub cov_type: Option<String>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            name: default_model(),
            with_wind: true,
            with_ar: true,
            with_nodal: true,
            epoch: default_epoch(),
            break_year: default_break_year(),
            start_acceleration: default_start_acceleration(),
            cov_type: None,
            alpha: default_alpha(),
        }
    }
}

fn default_model() -> String {
    "linear".to_string()
}
fn default_epoch() -> i32 {
    1970
}
fn default_break_year() -> i32 {
    1993
}
fn default_start_acceleration() -> i32 {
    1960
}
fn default_alpha() -> f64 {
    0.05
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlsarToml {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub require_convergence: bool,
}

impl Default for GlsarToml {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            require_convergence: false,
        }
    }
}

fn default_max_iterations() -> usize {
    50
}
fn default_tolerance() -> f64 {
    1e-4
}
