//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::{GlsarToml, ModelToml};

use slr_fit::{CovType, GlsarOptions};
use slr_models::{ModelKind, ModelOptions};

/// Parses a covariance name into the corresponding enum variant.
pub fn parse_cov_type(s: &str) -> Result<CovType> {
    match s.to_lowercase().as_str() {
        "nonrobust" => Ok(CovType::NonRobust),
        "hc0" => Ok(CovType::Hc0),
        other => bail!("unknown covariance type: {other:?}"),
    }
}

/// Parses a model name into a [`ModelKind`], taking break years from `options`.
pub fn parse_model(s: &str, options: &ModelOptions) -> Result<ModelKind> {
    match s.to_lowercase().as_str() {
        "linear" => Ok(ModelKind::Linear),
        "linear_acceleration" => Ok(ModelKind::LinearAcceleration),
        "broken_linear" => Ok(options.broken_linear()),
        "quadratic" => Ok(ModelKind::Quadratic),
        "broken_quadratic" => Ok(options.broken_quadratic()),
        other => bail!("unknown model: {other:?}"),
    }
}

/// Builds [`GlsarOptions`] from the TOML AR(1) configuration.
pub fn build_glsar_options(glsar: &GlsarToml) -> Result<GlsarOptions> {
    let opts = GlsarOptions::new()
        .with_max_iterations(glsar.max_iterations)
        .with_tolerance(glsar.tolerance)
        .with_require_convergence(glsar.require_convergence);
    opts.validate()?;
    Ok(opts)
}

/// Builds [`ModelOptions`] from the TOML model and AR(1) sections.
///
/// `quantity` comes from the I/O section.
pub fn build_model_options(
    model: &ModelToml,
    glsar: &GlsarToml,
    quantity: &str,
) -> Result<ModelOptions> {
    if !(model.alpha > 0.0 && model.alpha < 1.0) {
        bail!("alpha must be in (0, 1), got {}", model.alpha);
    }
    let mut options = ModelOptions::default()
        .with_wind(model.with_wind)
        .with_ar(model.with_ar)
        .with_nodal(model.with_nodal)
        .with_quantity(quantity)
        .with_epoch(model.epoch)
        .with_break_year(model.break_year)
        .with_start_acceleration(model.start_acceleration)
        .with_alpha(model.alpha)
        .with_glsar(build_glsar_options(glsar)?);
    if let Some(ref cov) = model.cov_type {
        options = options.with_cov_type(parse_cov_type(cov)?);
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cov_type_names() {
        assert_eq!(parse_cov_type("HC0").unwrap(), CovType::Hc0);
        assert_eq!(parse_cov_type("nonrobust").unwrap(), CovType::NonRobust);
        assert!(parse_cov_type("hc3").is_err());
    }

    #[test]
    fn model_names_use_configured_breaks() {
        let options = ModelOptions::default().with_break_year(2000);
        assert_eq!(
            parse_model("broken_linear", &options).unwrap(),
            ModelKind::BrokenLinear { break_year: 2000 }
        );
        assert_eq!(
            parse_model("Quadratic", &options).unwrap(),
            ModelKind::Quadratic
        );
        let err = parse_model("cubic", &options).unwrap_err();
        assert!(err.to_string().contains("unknown model"));
    }

    #[test]
    fn model_options_from_toml() {
        let model = ModelToml {
            with_ar: false,
            cov_type: Some("nonrobust".to_string()),
            ..ModelToml::default()
        };
        let options = build_model_options(&model, &GlsarToml::default(), "height - surge").unwrap();
        assert!(!options.ar());
        assert_eq!(options.quantity(), "height - surge");
        assert_eq!(options.cov_type(), Some(CovType::NonRobust));
    }

    #[test]
    fn invalid_settings_rejected() {
        let model = ModelToml {
            alpha: 1.5,
            ..ModelToml::default()
        };
        assert!(build_model_options(&model, &GlsarToml::default(), "height").is_err());
        let glsar = GlsarToml {
            tolerance: -1.0,
            ..GlsarToml::default()
        };
        assert!(build_glsar_options(&glsar).is_err());
    }
}
