//! Per-term contributions of a fitted model.

use ndarray::Array1;
use slr_fit::FitResult;
use slr_terms::Term;

use crate::error::EffectError;

/// Wind contribution of a fit and its deviation from the sample mean.
#[derive(Debug, Clone, PartialEq)]
pub struct WindEffect {
    /// `b(u²)·u² + b(v²)·v²` per fitted row.
    pub effect: Array1<f64>,
    /// `effect - mean(effect)`.
    pub anomaly: Array1<f64>,
}

/// Sum of `coefficient · column` over `terms`, per fitted row.
///
/// # Errors
///
/// [`EffectError::MissingTerm`] naming the first term absent from the fit.
pub fn term_effect(fit: &FitResult, terms: &[Term]) -> Result<Array1<f64>, EffectError> {
    let design = fit.design();
    let mut effect = Array1::zeros(design.nobs());
    for &term in terms {
        let j = design
            .index_of(term)
            .ok_or_else(|| EffectError::MissingTerm {
                term: term.to_string(),
            })?;
        effect.scaled_add(fit.params()[j], &design.exog().column(j));
    }
    Ok(effect)
}

/// Contribution of the nodal tide (`Nodal U` and `Nodal V`).
///
/// # Errors
///
/// [`EffectError::MissingTerm`] if the fit has no nodal terms.
pub fn tide_effect(fit: &FitResult) -> Result<Array1<f64>, EffectError> {
    term_effect(fit, &[Term::NodalU, Term::NodalV])
}

/// Contribution of the wind terms and its anomaly.
///
/// # Errors
///
/// [`EffectError::MissingTerm`] if the fit has no wind terms.
pub fn wind_effect_and_anomaly(fit: &FitResult) -> Result<WindEffect, EffectError> {
    let effect = term_effect(fit, &[Term::WindU2, Term::WindV2])?;
    let mean = effect.mean().unwrap_or(0.0);
    let anomaly = effect.mapv(|v| v - mean);
    Ok(WindEffect { effect, anomaly })
}

/// Element-wise `series - effect`.
///
/// # Errors
///
/// [`EffectError::LengthMismatch`] if the lengths differ.
pub fn subtract_effect(series: &[f64], effect: &Array1<f64>) -> Result<Array1<f64>, EffectError> {
    if series.len() != effect.len() {
        return Err(EffectError::LengthMismatch {
            expected: effect.len(),
            got: series.len(),
        });
    }
    Ok(series.iter().zip(effect).map(|(s, e)| s - e).collect())
}

/// Correction applied to the observed response by [`corrected_series`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// Remove the full wind contribution.
    Wind,
    /// Remove the wind anomaly, keeping the mean wind setup.
    WindAnomaly,
    /// Remove the nodal tide.
    Tide,
}

/// Observed response of the fitted rows with one contribution removed.
///
/// # Errors
///
/// [`EffectError::MissingTerm`] if the fit lacks the terms of `correction`.
pub fn corrected_series(fit: &FitResult, correction: Correction) -> Result<Array1<f64>, EffectError> {
    let effect = match correction {
        Correction::Wind => wind_effect_and_anomaly(fit)?.effect,
        Correction::WindAnomaly => wind_effect_and_anomaly(fit)?.anomaly,
        Correction::Tide => tide_effect(fit)?,
    };
    Ok(fit.design().endog() - &effect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn subtract_effect_elementwise() {
        let out = subtract_effect(&[3.0, 5.0], &array![1.0, 2.0]).unwrap();
        assert_eq!(out, array![2.0, 3.0]);
    }

    #[test]
    fn subtract_effect_length_mismatch() {
        let err = subtract_effect(&[3.0], &array![1.0, 2.0]).unwrap_err();
        assert_eq!(err, EffectError::LengthMismatch { expected: 2, got: 1 });
    }
}
