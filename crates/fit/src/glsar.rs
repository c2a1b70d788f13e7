//! AR(1) generalised least squares by bounded Cochrane–Orcutt iteration.

use ndarray::{Array1, Array2, s};
use slr_stats::yule_walker_ar1;
use tracing::{debug, warn};

use crate::error::FitError;
use crate::linalg::{LeastSquares, least_squares};
use crate::spec::GlsarOptions;

/// A least-squares solve together with the (possibly whitened) system it
/// was computed on.
#[derive(Debug, Clone)]
pub(crate) struct Solved {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub ls: LeastSquares,
}

/// Outcome of the AR(1) refinement.
#[derive(Debug, Clone)]
pub(crate) struct GlsarOutcome {
    pub solved: Solved,
    pub rho: f64,
    pub iterations: usize,
    pub converged: bool,
    /// rho before the first pass and after every update.
    pub history: Vec<f64>,
}

/// Applies the AR(1) filter `z[t] - rho · z[t-1]` to every column.
///
/// The first row has no predecessor and is dropped, so the result has
/// one row fewer than the input.
pub(crate) fn whiten_matrix(x: &Array2<f64>, rho: f64) -> Array2<f64> {
    let n = x.nrows();
    if n == 0 {
        return x.clone();
    }
    &x.slice(s![1.., ..]) - &x.slice(s![..n - 1, ..]).mapv(|v| v * rho)
}

/// Vector form of [`whiten_matrix`].
pub(crate) fn whiten_vector(y: &Array1<f64>, rho: f64) -> Array1<f64> {
    let n = y.len();
    if n == 0 {
        return y.clone();
    }
    &y.slice(s![1..]) - &y.slice(s![..n - 1]).mapv(|v| v * rho)
}

fn solve_whitened(x: &Array2<f64>, y: &Array1<f64>, rho: f64) -> Result<Solved, FitError> {
    let wx = whiten_matrix(x, rho);
    let wy = whiten_vector(y, rho);
    let ls = least_squares(&wx, &wy)?;
    Ok(Solved { x: wx, y: wy, ls })
}

/// Largest coefficient change relative to the size of the previous
/// coefficient vector (max norm).
pub(crate) fn relative_change(prev: &Array1<f64>, next: &Array1<f64>) -> f64 {
    let delta = prev
        .iter()
        .zip(next)
        .fold(0.0_f64, |m, (a, b)| m.max((a - b).abs()));
    let scale = prev.iter().fold(0.0_f64, |m, a| m.max(a.abs()));
    if scale > 0.0 { delta / scale } else { delta }
}

/// Runs the refinement on the unwhitened design `x`, `y`.
///
/// The first pass uses `rho_init`. Each iteration estimates rho from the
/// unwhitened residuals and refits. It stops once both rho and the
/// coefficients (relative, max norm) move less than the tolerance, or after
/// `max_iterations` updates.
pub(crate) fn iterate(
    x: &Array2<f64>,
    y: &Array1<f64>,
    options: &GlsarOptions,
) -> Result<GlsarOutcome, FitError> {
    let mut rho = options.rho_init();
    let mut history = vec![rho];
    let mut solved = solve_whitened(x, y, rho)?;
    let mut iterations = 0;
    let mut last_change = f64::INFINITY;
    let mut converged = false;

    while iterations < options.max_iterations() {
        let resid: Vec<f64> = (y - &x.dot(&solved.ls.params)).to_vec();
        let next = yule_walker_ar1(&resid);
        let rho_change = (next - rho).abs();
        rho = next;
        history.push(rho);
        let refit = solve_whitened(x, y, rho)?;
        let param_change = relative_change(&solved.ls.params, &refit.ls.params);
        solved = refit;
        last_change = rho_change.max(param_change);
        iterations += 1;
        debug!(iteration = iterations, rho, rho_change, param_change, "AR(1) update");

        if last_change < options.tolerance() {
            converged = true;
            break;
        }
    }

    if !converged {
        if options.require_convergence() {
            return Err(FitError::NonConvergence {
                iterations,
                last_change,
            });
        }
        warn!(
            iterations,
            rho,
            last_change,
            tolerance = options.tolerance(),
            "AR(1) refinement stopped before convergence"
        );
    }

    Ok(GlsarOutcome {
        solved,
        rho,
        iterations,
        converged,
        history,
    })
}
