//! Counterfactual forcing scenarios.

use ndarray::Array2;
use slr_fit::{FitResult, Prediction};
use slr_terms::Term;
use tracing::debug;

use crate::error::EffectError;

/// Replacement applied to one regressor column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Sample mean of the column over the fitted rows.
    Mean,
    Zero,
    Value(f64),
}

/// A set of column replacements evaluated against a fit.
///
/// # Example
///
/// ```
/// use slr_effects::{Adjustment, Scenario};
/// use slr_terms::Term;
///
/// let scenario = Scenario::new()
///     .with(Term::WindU2, Adjustment::Mean)
///     .with(Term::NodalU, Adjustment::Zero);
/// assert_eq!(scenario.adjustments().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    adjustments: Vec<(Term, Adjustment)>,
}

impl Scenario {
    /// An empty scenario (actual forcing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the adjustment of `term`.
    pub fn with(mut self, term: Term, adjustment: Adjustment) -> Self {
        match self.adjustments.iter_mut().find(|(t, _)| *t == term) {
            Some((_, slot)) => *slot = adjustment,
            None => self.adjustments.push((term, adjustment)),
        }
        self
    }

    pub fn adjustments(&self) -> &[(Term, Adjustment)] {
        &self.adjustments
    }

    /// Wind held at its mean.
    pub fn mean_wind() -> Self {
        Self::new()
            .with(Term::WindU2, Adjustment::Mean)
            .with(Term::WindV2, Adjustment::Mean)
    }

    /// Nodal tide removed.
    pub fn zero_tide() -> Self {
        Self::new()
            .with(Term::NodalU, Adjustment::Zero)
            .with(Term::NodalV, Adjustment::Zero)
    }

    /// Nodal tide held at its mean.
    pub fn mean_tide() -> Self {
        Self::new()
            .with(Term::NodalU, Adjustment::Mean)
            .with(Term::NodalV, Adjustment::Mean)
    }

    /// Mean wind and no nodal tide.
    pub fn mean_wind_zero_tide() -> Self {
        Self::mean_wind()
            .with(Term::NodalU, Adjustment::Zero)
            .with(Term::NodalV, Adjustment::Zero)
    }
}

/// The fitted design with the columns of `scenario` replaced.
///
/// # Errors
///
/// [`EffectError::MissingTerm`] if a scenario term is not in the fit.
pub fn counterfactual_design(
    fit: &FitResult,
    scenario: &Scenario,
) -> Result<Array2<f64>, EffectError> {
    let design = fit.design();
    let mut exog = design.exog().clone();
    for &(term, adjustment) in scenario.adjustments() {
        let j = design
            .index_of(term)
            .ok_or_else(|| EffectError::MissingTerm {
                term: term.to_string(),
            })?;
        let value = match adjustment {
            Adjustment::Mean => design.exog().column(j).mean().unwrap_or(0.0),
            Adjustment::Zero => 0.0,
            Adjustment::Value(v) => v,
        };
        exog.column_mut(j).fill(value);
    }
    Ok(exog)
}

/// Evaluates the fit's coefficients and covariance at the scenario design.
///
/// # Errors
///
/// [`EffectError::MissingTerm`] if a scenario term is not in the fit.
pub fn predict_scenario(fit: &FitResult, scenario: &Scenario) -> Result<Prediction, EffectError> {
    let exog = counterfactual_design(fit, scenario)?;
    debug!(
        adjustments = scenario.adjustments().len(),
        rows = exog.nrows(),
        "scenario prediction"
    );
    Ok(fit.get_prediction(&exog)?)
}
