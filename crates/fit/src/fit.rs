//! Fitted regression results.

use ndarray::{Array1, Array2};
use serde::Serialize;
use slr_stats::f_survival;
use slr_terms::{DesignMatrix, Term};

use crate::error::FitError;
use crate::linalg::try_inverse;
use crate::prediction::{InferenceDistribution, Prediction};
use crate::spec::{CovType, FitSpec};

/// One row of a coefficient table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamEstimate {
    pub term: Term,
    pub name: String,
    pub coef: f64,
    pub std_err: f64,
    /// t statistic (non-robust) or z statistic (HC0).
    pub statistic: f64,
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Wald test that every non-constant coefficient is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FTest {
    pub statistic: f64,
    pub p_value: f64,
    pub df_num: usize,
    pub df_denom: usize,
}

/// Intermediate values handed from the estimator to [`FitResult`].
#[derive(Debug, Clone)]
pub(crate) struct FitParts {
    pub spec: FitSpec,
    pub design: DesignMatrix,
    pub params: Array1<f64>,
    pub cov: Array2<f64>,
    pub rank: usize,
    pub nobs: usize,
    pub ssr: f64,
    pub centered_tss: f64,
    pub rho: f64,
    pub rho_history: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// A fitted regression produced by [`FitSpec::fit()`].
///
/// The result keeps the design matrix it was estimated on (after the
/// missing-value drop), so coefficients, columns and names always line up.
/// Statistics refer to the system actually solved: for GLSAR that is the
/// whitened regression with one row fewer than the design. Fitted values
/// and residuals are on the unwhitened design.
///
/// ```mermaid
/// graph LR
///     B["FitResult"] --> C[".param(Term)?"]
///     B --> D[".summary(alpha)?"]
///     B --> E[".get_prediction(&exog)?"]
///     B --> F[".rho() / .converged()"]
/// ```
#[derive(Debug, Clone)]
pub struct FitResult {
    spec: FitSpec,
    design: DesignMatrix,
    params: Array1<f64>,
    cov: Array2<f64>,
    fitted: Array1<f64>,
    resid: Array1<f64>,
    rank: usize,
    nobs: usize,
    ssr: f64,
    centered_tss: f64,
    llf: f64,
    rho: f64,
    rho_history: Vec<f64>,
    iterations: usize,
    converged: bool,
    f_test: Option<FTest>,
}

impl FitResult {
    pub(crate) fn from_parts(parts: FitParts) -> Self {
        let fitted = parts.design.exog().dot(&parts.params);
        let resid = parts.design.endog() - &fitted;
        let n = parts.nobs as f64;
        let llf = -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (parts.ssr / n).ln() + 1.0);

        let mut result = Self {
            spec: parts.spec,
            design: parts.design,
            params: parts.params,
            cov: parts.cov,
            fitted,
            resid,
            rank: parts.rank,
            nobs: parts.nobs,
            ssr: parts.ssr,
            centered_tss: parts.centered_tss,
            llf,
            rho: parts.rho,
            rho_history: parts.rho_history,
            iterations: parts.iterations,
            converged: parts.converged,
            f_test: None,
        };
        result.f_test = result.wald_f_test();
        result
    }

    /// Returns the [`FitSpec`] that produced this fit.
    pub fn spec(&self) -> FitSpec {
        self.spec
    }

    pub fn cov_type(&self) -> CovType {
        self.spec.cov_type()
    }

    /// The design matrix used, after the missing-value drop.
    pub fn design(&self) -> &DesignMatrix {
        &self.design
    }

    /// Term labels in coefficient order.
    pub fn names(&self) -> Vec<&str> {
        self.design.names()
    }

    pub fn terms(&self) -> Vec<Term> {
        self.design.terms()
    }

    pub fn params(&self) -> &Array1<f64> {
        &self.params
    }

    /// Coefficient of `term`.
    ///
    /// # Errors
    ///
    /// [`FitError::MissingTerm`] if the model has no such term.
    pub fn param(&self, term: Term) -> Result<f64, FitError> {
        self.term_index(term).map(|j| self.params[j])
    }

    /// Coefficient looked up by label.
    ///
    /// # Errors
    ///
    /// [`FitError::MissingTerm`] if no column carries `name`.
    pub fn param_by_name(&self, name: &str) -> Result<f64, FitError> {
        self.design
            .index_of_name(name)
            .map(|j| self.params[j])
            .ok_or_else(|| FitError::MissingTerm {
                term: name.to_string(),
            })
    }

    /// Column index of `term`.
    ///
    /// # Errors
    ///
    /// [`FitError::MissingTerm`] if the model has no such term.
    pub fn term_index(&self, term: Term) -> Result<usize, FitError> {
        self.design
            .index_of(term)
            .ok_or_else(|| FitError::MissingTerm {
                term: term.to_string(),
            })
    }

    /// Coefficient covariance of the configured [`CovType`].
    pub fn cov_params(&self) -> &Array2<f64> {
        &self.cov
    }

    /// Standard errors of the coefficients.
    pub fn bse(&self) -> Array1<f64> {
        self.cov.diag().mapv(f64::sqrt)
    }

    /// Standard error of `term`.
    pub fn std_err(&self, term: Term) -> Result<f64, FitError> {
        self.term_index(term).map(|j| self.cov[[j, j]].sqrt())
    }

    /// Coefficient over standard error.
    pub fn tvalues(&self) -> Array1<f64> {
        &self.params / &self.bse()
    }

    pub fn pvalues(&self) -> Array1<f64> {
        let dist = self.distribution();
        self.tvalues().mapv(|t| dist.two_sided_p(t))
    }

    /// Distribution used for inference: normal for HC0, Student-t otherwise.
    pub fn distribution(&self) -> InferenceDistribution {
        match self.spec.cov_type() {
            CovType::Hc0 => InferenceDistribution::Normal,
            CovType::NonRobust => InferenceDistribution::StudentT {
                df: self.df_resid() as f64,
            },
        }
    }

    /// Confidence intervals, one `[lower, upper]` row per coefficient.
    ///
    /// # Errors
    ///
    /// [`FitError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn conf_int(&self, alpha: f64) -> Result<Array2<f64>, FitError> {
        let q = self.distribution().critical_value(alpha)?;
        let bse = self.bse();
        Ok(Array2::from_shape_fn((self.params.len(), 2), |(j, k)| {
            if k == 0 {
                self.params[j] - q * bse[j]
            } else {
                self.params[j] + q * bse[j]
            }
        }))
    }

    /// Coefficient table at confidence level `1 - alpha`.
    ///
    /// # Errors
    ///
    /// [`FitError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn summary(&self, alpha: f64) -> Result<Vec<ParamEstimate>, FitError> {
        let ci = self.conf_int(alpha)?;
        let bse = self.bse();
        let tvalues = self.tvalues();
        let pvalues = self.pvalues();
        Ok(self
            .design
            .columns()
            .iter()
            .enumerate()
            .map(|(j, col)| ParamEstimate {
                term: col.term,
                name: col.label.clone(),
                coef: self.params[j],
                std_err: bse[j],
                statistic: tvalues[j],
                p_value: pvalues[j],
                ci_lower: ci[[j, 0]],
                ci_upper: ci[[j, 1]],
            })
            .collect())
    }

    /// AR(1) coefficient of the final pass (0 for OLS).
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// rho before the first pass and after every update (empty for OLS).
    pub fn rho_history(&self) -> &[f64] {
        &self.rho_history
    }

    /// Number of AR(1) updates performed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Fitted values on the unwhitened design.
    pub fn fitted(&self) -> &Array1<f64> {
        &self.fitted
    }

    /// Residuals on the unwhitened design.
    pub fn resid(&self) -> &Array1<f64> {
        &self.resid
    }

    /// Rows of the solved system.
    pub fn nobs(&self) -> usize {
        self.nobs
    }

    /// Rows removed from the source series for missing values.
    pub fn n_dropped(&self) -> usize {
        self.design.n_dropped()
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn df_model(&self) -> usize {
        self.rank - usize::from(self.design.contains(Term::Constant))
    }

    pub fn df_resid(&self) -> usize {
        self.nobs - self.rank
    }

    /// Sum of squared (whitened) residuals.
    pub fn ssr(&self) -> f64 {
        self.ssr
    }

    /// Residual variance `ssr / df_resid`.
    pub fn scale(&self) -> f64 {
        self.ssr / self.df_resid() as f64
    }

    /// Gaussian log-likelihood.
    pub fn llf(&self) -> f64 {
        self.llf
    }

    pub fn aic(&self) -> f64 {
        -2.0 * self.llf + 2.0 * self.rank as f64
    }

    pub fn bic(&self) -> f64 {
        -2.0 * self.llf + (self.nobs as f64).ln() * self.rank as f64
    }

    /// Centred coefficient of determination.
    pub fn r_squared(&self) -> f64 {
        1.0 - self.ssr / self.centered_tss
    }

    /// Wald F-test of the non-constant terms, `None` for a constant-only
    /// model or a singular restricted covariance.
    pub fn f_test(&self) -> Option<FTest> {
        self.f_test
    }

    /// Point predictions `exog · b`.
    ///
    /// # Errors
    ///
    /// [`FitError::DimensionMismatch`] if `exog` has the wrong column count.
    pub fn predict(&self, exog: &Array2<f64>) -> Result<Array1<f64>, FitError> {
        self.check_columns(exog)?;
        Ok(exog.dot(&self.params))
    }

    /// Predictions with standard errors of the mean and of a new
    /// observation, using this fit's covariance and scale.
    ///
    /// # Errors
    ///
    /// [`FitError::DimensionMismatch`] if `exog` has the wrong column count.
    pub fn get_prediction(&self, exog: &Array2<f64>) -> Result<Prediction, FitError> {
        self.check_columns(exog)?;
        let mean = exog.dot(&self.params);
        let xv = exog.dot(&self.cov);
        let var_mean: Array1<f64> = xv
            .rows()
            .into_iter()
            .zip(exog.rows())
            .map(|(a, b)| a.dot(&b))
            .collect();
        let scale = self.scale();
        let se_mean = var_mean.mapv(|v| v.max(0.0).sqrt());
        let se_obs = var_mean.mapv(|v| (v.max(0.0) + scale).sqrt());
        Ok(Prediction::new(mean, se_mean, se_obs, self.distribution()))
    }

    fn check_columns(&self, exog: &Array2<f64>) -> Result<(), FitError> {
        if exog.ncols() != self.params.len() {
            return Err(FitError::DimensionMismatch {
                expected: self.params.len(),
                got: exog.ncols(),
            });
        }
        Ok(())
    }

    fn wald_f_test(&self) -> Option<FTest> {
        let constant = self.design.index_of(Term::Constant);
        let idx: Vec<usize> = (0..self.params.len())
            .filter(|&j| Some(j) != constant)
            .collect();
        let q = idx.len();
        if q == 0 || self.df_resid() == 0 {
            return None;
        }
        let b: Array1<f64> = idx.iter().map(|&j| self.params[j]).collect();
        let v = Array2::from_shape_fn((q, q), |(a, c)| self.cov[[idx[a], idx[c]]]);
        let v_inv = try_inverse(&v)?;
        let statistic = b.dot(&v_inv.dot(&b)) / q as f64;
        let df_denom = self.df_resid();
        Some(FTest {
            statistic,
            p_value: f_survival(statistic, q as f64, df_denom as f64),
            df_num: q,
            df_denom,
        })
    }
}
