//! Statistical helper functions for sea-level trend estimation.
//!
//! Descriptive statistics over `&[f64]` slices, lag autocovariances for the
//! AR(1) refinement, a centred rolling mean and distribution quantiles used
//! by confidence intervals.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Mean over the finite values of a slice, skipping NaN.
///
/// Returns `None` if no finite value is present.
pub fn nanmean(data: &[f64]) -> Option<f64> {
    let (sum, n) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold((0.0, 0usize), |(s, n), &x| (s + x, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Sample standard deviation with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn sd(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Replaces every non-finite value with the mean of the finite values.
///
/// A slice with no finite value is returned unchanged.
pub fn fill_with_mean(data: &[f64]) -> Vec<f64> {
    match nanmean(data) {
        Some(m) => data
            .iter()
            .map(|&x| if x.is_finite() { x } else { m })
            .collect(),
        None => data.to_vec(),
    }
}

/// Autocovariance at `lag` of the demeaned series.
///
/// The lag product sum is divided by `n - lag` ("adjusted"), matching the
/// Yule–Walker convention used for the AR(1) refinement. Returns 0.0 when
/// `lag >= n`.
pub fn autocovariance(data: &[f64], lag: usize) -> f64 {
    let n = data.len();
    if lag >= n {
        return 0.0;
    }
    let m = mean(data);
    let sum: f64 = data[lag..]
        .iter()
        .zip(data.iter())
        .map(|(a, b)| (a - m) * (b - m))
        .sum();
    sum / (n - lag) as f64
}

/// Yule–Walker estimate of the AR(1) coefficient: `r(1) / r(0)`.
///
/// Returns 0.0 for a series shorter than 2 or with zero variance.
pub fn yule_walker_ar1(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let r0 = autocovariance(data, 0);
    if !r0.is_finite() || r0 <= 0.0 {
        return 0.0;
    }
    let rho = autocovariance(data, 1) / r0;
    if rho.is_finite() { rho } else { 0.0 }
}

/// Centred rolling mean over `window` values.
///
/// Position `i` averages `data[i - window/2 .. i - window/2 + window]`.
/// Positions whose window is incomplete or contains a non-finite value are
/// NaN. A zero window yields all NaN.
pub fn rolling_mean_centered(data: &[f64], window: usize) -> Vec<f64> {
    let n = data.len();
    let mut out = vec![f64::NAN; n];
    if window == 0 || window > n {
        return out;
    }
    let half = window / 2;
    for (i, slot) in out.iter_mut().enumerate() {
        if i < half || i - half + window > n {
            continue;
        }
        let w = &data[i - half..i - half + window];
        if w.iter().all(|x| x.is_finite()) {
            *slot = w.iter().sum::<f64>() / window as f64;
        }
    }
    out
}

/// Quantile of the standard normal distribution.
///
/// `p` must lie in the open interval (0, 1); otherwise NaN is returned.
pub fn normal_quantile(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    match Normal::new(0.0, 1.0) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Quantile of Student's t distribution with `df` degrees of freedom.
///
/// Returns NaN for `p` outside (0, 1) or non-positive `df`.
pub fn student_t_quantile(p: f64, df: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(_) => f64::NAN,
    }
}

/// Two-sided p-value of a standard-normal statistic.
pub fn normal_two_sided_p(stat: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(dist) => 2.0 * dist.sf(stat.abs()),
        Err(_) => f64::NAN,
    }
}

/// Two-sided p-value of a Student-t statistic with `df` degrees of freedom.
pub fn student_t_two_sided_p(stat: f64, df: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * dist.sf(stat.abs()),
        Err(_) => f64::NAN,
    }
}

/// Upper-tail probability of an F statistic with `(d1, d2)` degrees of freedom.
pub fn f_survival(stat: f64, d1: f64, d2: f64) -> f64 {
    match FisherSnedecor::new(d1, d2) {
        Ok(dist) => dist.sf(stat),
        Err(_) => f64::NAN,
    }
}
