//! Model presets and their options.

use std::fmt;

use serde::Serialize;
use slr_fit::{CovType, FitSpec, GlsarOptions};
use slr_terms::{DEFAULT_EPOCH, DEFAULT_QUANTITY, TermConfig, TrendShape};

/// Year after which the broken-linear model adds a second trend.
pub const DEFAULT_BREAK_YEAR: i32 = 1993;

/// Year from which the broken-quadratic model accelerates.
pub const DEFAULT_START_ACCELERATION: i32 = 1960;

/// The trend model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Quadratic trend and nodal cycle, no wind, plain OLS.
    LinearAcceleration,
    Linear,
    BrokenLinear { break_year: i32 },
    Quadratic,
    BrokenQuadratic { start_acceleration: i32 },
}

impl ModelKind {
    /// Short identifier used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::LinearAcceleration => "linear_acceleration",
            ModelKind::Linear => "linear",
            ModelKind::BrokenLinear { .. } => "broken_linear",
            ModelKind::Quadratic => "quadratic",
            ModelKind::BrokenQuadratic { .. } => "broken_quadratic",
        }
    }

    /// Term set of this model under `options`.
    ///
    /// The linear-acceleration preset never carries wind terms.
    pub fn term_config(&self, options: &ModelOptions) -> TermConfig {
        let epoch = options.epoch();
        let trend = match *self {
            ModelKind::LinearAcceleration | ModelKind::Quadratic => TrendShape::Quadratic { epoch },
            ModelKind::Linear => TrendShape::Linear { epoch },
            ModelKind::BrokenLinear { break_year } => TrendShape::BrokenLinear { epoch, break_year },
            ModelKind::BrokenQuadratic { start_acceleration } => {
                TrendShape::BrokenQuadratic { start_acceleration }
            }
        };
        let with_wind = options.wind() && *self != ModelKind::LinearAcceleration;
        TermConfig::new(trend)
            .with_nodal(options.nodal())
            .with_wind(with_wind)
            .with_quantity(options.quantity())
    }

    /// Covariance used unless the options override it.
    pub fn default_cov_type(&self) -> CovType {
        match self {
            ModelKind::LinearAcceleration => CovType::NonRobust,
            _ => CovType::Hc0,
        }
    }

    /// Estimator of this model under `options`.
    ///
    /// | Model | `with_ar` | `!with_ar` |
    /// |-------|-----------|------------|
    /// | linear acceleration | OLS, nonrobust | OLS, nonrobust |
    /// | all others | GLSAR, HC0 | OLS, HC0 |
    pub fn fit_spec(&self, options: &ModelOptions) -> FitSpec {
        let cov = options.cov_type().unwrap_or(self.default_cov_type());
        if options.ar() && *self != ModelKind::LinearAcceleration {
            FitSpec::glsar(options.glsar(), cov)
        } else {
            FitSpec::ols(cov)
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::BrokenLinear { break_year } => write!(f, "broken_linear ({break_year})"),
            ModelKind::BrokenQuadratic { start_acceleration } => {
                write!(f, "broken_quadratic ({start_acceleration})")
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Switches shared by every model preset.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOptions {
    with_wind: bool,
    with_ar: bool,
    with_nodal: bool,
    quantity: String,
    epoch: i32,
    break_year: i32,
    start_acceleration: i32,
    cov_type: Option<CovType>,
    glsar: GlsarOptions,
    alpha: f64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            with_wind: true,
            with_ar: true,
            with_nodal: true,
            quantity: DEFAULT_QUANTITY.to_string(),
            epoch: DEFAULT_EPOCH,
            break_year: DEFAULT_BREAK_YEAR,
            start_acceleration: DEFAULT_START_ACCELERATION,
            cov_type: None,
            glsar: GlsarOptions::default(),
            alpha: 0.05,
        }
    }
}

impl ModelOptions {
    /// Defaults with the historical three-pass AR(1) refinement.
    pub fn legacy() -> Self {
        Self::default().with_glsar(GlsarOptions::legacy())
    }

    pub fn with_wind(mut self, with_wind: bool) -> Self {
        self.with_wind = with_wind;
        self
    }

    /// Enable or disable the AR(1) refinement.
    pub fn with_ar(mut self, with_ar: bool) -> Self {
        self.with_ar = with_ar;
        self
    }

    pub fn with_nodal(mut self, with_nodal: bool) -> Self {
        self.with_nodal = with_nodal;
        self
    }

    /// Set the response column.
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    /// Set the reference year of the trend terms.
    pub fn with_epoch(mut self, epoch: i32) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_break_year(mut self, break_year: i32) -> Self {
        self.break_year = break_year;
        self
    }

    pub fn with_start_acceleration(mut self, start_acceleration: i32) -> Self {
        self.start_acceleration = start_acceleration;
        self
    }

    /// Override the per-model covariance default.
    pub fn with_cov_type(mut self, cov_type: CovType) -> Self {
        self.cov_type = Some(cov_type);
        self
    }

    pub fn with_glsar(mut self, glsar: GlsarOptions) -> Self {
        self.glsar = glsar;
        self
    }

    /// Set the significance level of reported intervals.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn wind(&self) -> bool {
        self.with_wind
    }

    pub fn ar(&self) -> bool {
        self.with_ar
    }

    pub fn nodal(&self) -> bool {
        self.with_nodal
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn epoch(&self) -> i32 {
        self.epoch
    }

    pub fn break_year(&self) -> i32 {
        self.break_year
    }

    pub fn start_acceleration(&self) -> i32 {
        self.start_acceleration
    }

    pub fn cov_type(&self) -> Option<CovType> {
        self.cov_type
    }

    pub fn glsar(&self) -> GlsarOptions {
        self.glsar
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The broken-linear preset at the configured break year.
    pub fn broken_linear(&self) -> ModelKind {
        ModelKind::BrokenLinear {
            break_year: self.break_year,
        }
    }

    /// The broken-quadratic preset at the configured start year.
    pub fn broken_quadratic(&self) -> ModelKind {
        ModelKind::BrokenQuadratic {
            start_acceleration: self.start_acceleration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slr_fit::Estimator;

    #[test]
    fn default_options() {
        let o = ModelOptions::default();
        assert!(o.wind());
        assert!(o.ar());
        assert!(o.nodal());
        assert_eq!(o.quantity(), "height");
        assert_eq!(o.epoch(), 1970);
        assert_eq!(o.broken_linear(), ModelKind::BrokenLinear { break_year: 1993 });
        assert_eq!(
            o.broken_quadratic(),
            ModelKind::BrokenQuadratic {
                start_acceleration: 1960
            }
        );
        assert_eq!(o.cov_type(), None);
        assert_eq!(o.alpha(), 0.05);
        assert_eq!(ModelOptions::legacy().glsar().max_iterations(), 2);
    }

    #[test]
    fn linear_acceleration_is_plain_ols() {
        let o = ModelOptions::default();
        let spec = ModelKind::LinearAcceleration.fit_spec(&o);
        assert_eq!(spec.estimator(), Estimator::Ols);
        assert_eq!(spec.cov_type(), CovType::NonRobust);
        assert!(!ModelKind::LinearAcceleration.term_config(&o).wind());
    }

    #[test]
    fn ar_switch_selects_estimator() {
        let o = ModelOptions::default();
        let spec = ModelKind::Quadratic.fit_spec(&o);
        assert_eq!(spec.estimator().name(), "GLSAR");
        assert_eq!(spec.cov_type(), CovType::Hc0);
        let spec = ModelKind::Linear.fit_spec(&o.clone().with_ar(false));
        assert_eq!(spec.estimator(), Estimator::Ols);
        assert_eq!(spec.cov_type(), CovType::Hc0);
    }

    #[test]
    fn cov_type_override() {
        let o = ModelOptions::default().with_cov_type(CovType::NonRobust);
        assert_eq!(ModelKind::Linear.fit_spec(&o).cov_type(), CovType::NonRobust);
    }

    #[test]
    fn term_config_mapping() {
        let o = ModelOptions::default().with_quantity("height - surge").with_nodal(false);
        let cfg = ModelKind::BrokenLinear { break_year: 1993 }.term_config(&o);
        assert_eq!(
            cfg.trend(),
            TrendShape::BrokenLinear {
                epoch: 1970,
                break_year: 1993
            }
        );
        assert!(!cfg.nodal());
        assert!(cfg.wind());
        assert_eq!(cfg.quantity(), "height - surge");
    }

    #[test]
    fn display_includes_break_year() {
        assert_eq!(ModelKind::Linear.to_string(), "linear");
        assert_eq!(
            ModelKind::BrokenLinear { break_year: 1993 }.to_string(),
            "broken_linear (1993)"
        );
    }
}
