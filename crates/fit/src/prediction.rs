//! Predictions with standard errors and intervals.

use ndarray::{Array1, Array2};
use serde::Serialize;
use slr_stats::{normal_quantile, normal_two_sided_p, student_t_quantile, student_t_two_sided_p};

use crate::error::FitError;

/// Reference distribution of coefficient and prediction statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum InferenceDistribution {
    /// Standard normal (robust covariance).
    Normal,
    /// Student's t with the residual degrees of freedom.
    StudentT { df: f64 },
}

impl InferenceDistribution {
    /// Two-sided critical value at significance `alpha`.
    ///
    /// # Errors
    ///
    /// [`FitError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn critical_value(&self, alpha: f64) -> Result<f64, FitError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(FitError::InvalidAlpha { alpha });
        }
        let p = 1.0 - alpha / 2.0;
        Ok(match *self {
            InferenceDistribution::Normal => normal_quantile(p),
            InferenceDistribution::StudentT { df } => student_t_quantile(p, df),
        })
    }

    /// Two-sided p-value of a test statistic.
    pub fn two_sided_p(&self, stat: f64) -> f64 {
        match *self {
            InferenceDistribution::Normal => normal_two_sided_p(stat),
            InferenceDistribution::StudentT { df } => student_t_two_sided_p(stat, df),
        }
    }
}

/// Predicted means at a set of regressor rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    mean: Array1<f64>,
    se_mean: Array1<f64>,
    se_obs: Array1<f64>,
    distribution: InferenceDistribution,
}

impl Prediction {
    pub(crate) fn new(
        mean: Array1<f64>,
        se_mean: Array1<f64>,
        se_obs: Array1<f64>,
        distribution: InferenceDistribution,
    ) -> Self {
        Self {
            mean,
            se_mean,
            se_obs,
            distribution,
        }
    }

    /// Point predictions `X b`.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Standard error of the predicted mean, `sqrt(diag(X V X'))`.
    pub fn se_mean(&self) -> &Array1<f64> {
        &self.se_mean
    }

    /// Standard error of a new observation, `sqrt(se_mean² + scale)`.
    pub fn se_obs(&self) -> &Array1<f64> {
        &self.se_obs
    }

    pub fn distribution(&self) -> InferenceDistribution {
        self.distribution
    }

    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Interval bounds, one `[lower, upper]` row per prediction.
    ///
    /// With `obs == false` this is the confidence interval of the mean,
    /// otherwise the prediction interval of a new observation.
    ///
    /// # Errors
    ///
    /// [`FitError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn conf_int(&self, obs: bool, alpha: f64) -> Result<Array2<f64>, FitError> {
        let q = self.distribution.critical_value(alpha)?;
        let se = if obs { &self.se_obs } else { &self.se_mean };
        Ok(Array2::from_shape_fn((self.len(), 2), |(i, j)| {
            if j == 0 {
                self.mean[i] - q * se[i]
            } else {
                self.mean[i] + q * se[i]
            }
        }))
    }
}
