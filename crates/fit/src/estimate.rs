//! Estimation driver shared by all [`FitSpec`]s.

use ndarray::{Array1, Array2};
use slr_terms::DesignMatrix;
use tracing::debug;

use crate::covariance;
use crate::error::FitError;
use crate::fit::{FitParts, FitResult};
use crate::glsar::{self, Solved};
use crate::linalg::least_squares;
use crate::spec::{CovType, Estimator, FitSpec};

/// Fits `design` with the estimator and covariance of `spec`.
#[tracing::instrument(
    skip_all,
    fields(
        estimator = spec.estimator().name(),
        cov_type = %spec.cov_type(),
        quantity = design.quantity(),
        n = design.nobs(),
        p = design.n_params(),
    )
)]
pub(crate) fn fit_design(design: &DesignMatrix, spec: &FitSpec) -> Result<FitResult, FitError> {
    let x = design.exog();
    let y = design.endog();
    let p = design.n_params();

    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::NonFiniteData);
    }

    let (solved, rho, rho_history, iterations, converged) = match spec.estimator() {
        Estimator::Ols => {
            check_rows(design.nobs(), p + 1)?;
            let ls = least_squares(x, y)?;
            let solved = Solved {
                x: x.clone(),
                y: y.clone(),
                ls,
            };
            (solved, 0.0, Vec::new(), 0, true)
        }
        Estimator::GlsAr1(options) => {
            options.validate()?;
            // whitening costs one row
            check_rows(design.nobs(), p + 2)?;
            let out = glsar::iterate(x, y, &options)?;
            (out.solved, out.rho, out.history, out.iterations, out.converged)
        }
    };

    let Solved { x: wx, y: wy, ls } = solved;
    let wresid: Array1<f64> = &wy - &wx.dot(&ls.params);
    let ssr = wresid.dot(&wresid);
    let nobs = wx.nrows();
    let df_resid = nobs - ls.rank;
    let scale = ssr / df_resid as f64;

    let cov: Array2<f64> = match spec.cov_type() {
        CovType::NonRobust => covariance::nonrobust(&ls.xtx_inv, scale),
        CovType::Hc0 => covariance::hc0(&wx, &wresid, &ls.xtx_inv),
    };

    let wy_mean = wy.mean().unwrap_or(0.0);
    let centered_tss = wy.iter().map(|v| (v - wy_mean).powi(2)).sum();

    debug!(nobs, rho, iterations, converged, ssr, "fit complete");

    Ok(FitResult::from_parts(FitParts {
        spec: *spec,
        design: design.clone(),
        params: ls.params,
        cov,
        rank: ls.rank,
        nobs,
        ssr,
        centered_tss,
        rho,
        rho_history,
        iterations,
        converged,
    }))
}

fn check_rows(n: usize, min: usize) -> Result<(), FitError> {
    if n < min {
        return Err(FitError::InsufficientData { n, min });
    }
    Ok(())
}
