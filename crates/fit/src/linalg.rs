//! Least-squares solve via singular value decomposition.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

use crate::error::FitError;

/// Solution of `min |y - X b|²` for a full-rank `X`.
#[derive(Debug, Clone)]
pub(crate) struct LeastSquares {
    pub params: Array1<f64>,
    /// `(X'X)⁻¹`, the normalised covariance of the coefficients.
    pub xtx_inv: Array2<f64>,
    pub rank: usize,
}

/// Solves the least-squares problem by thin SVD.
///
/// Singular values below `s_max · max(n, p) · ε` are treated as zero; a
/// rank below `p` is an error.
pub(crate) fn least_squares(x: &Array2<f64>, y: &Array1<f64>) -> Result<LeastSquares, FitError> {
    let (n, p) = x.dim();
    let svd = to_dmatrix(x).svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
        return Err(FitError::SingularMatrix { rank: 0, n_params: p });
    };
    let s = &svd.singular_values;

    let s_max = s.iter().copied().fold(0.0, f64::max);
    let tol = s_max * n.max(p) as f64 * f64::EPSILON;
    let rank = s.iter().filter(|&&v| v > tol).count();
    if rank < p {
        return Err(FitError::SingularMatrix { rank, n_params: p });
    }

    let k = s.len();
    let uty = u.transpose() * DVector::from_iterator(n, y.iter().copied());
    let scaled = DVector::from_fn(k, |i, _| uty[i] / s[i]);
    let v = v_t.transpose();
    let beta = &v * scaled;

    let xtx_inv = Array2::from_shape_fn((p, p), |(i, j)| {
        (0..k).map(|m| v[(i, m)] * v[(j, m)] / (s[m] * s[m])).sum()
    });

    Ok(LeastSquares {
        params: beta.iter().copied().collect(),
        xtx_inv,
        rank,
    })
}

/// Inverts a small symmetric matrix, `None` if it is singular.
pub(crate) fn try_inverse(a: &Array2<f64>) -> Option<Array2<f64>> {
    let inv = to_dmatrix(a).try_inverse()?;
    Some(Array2::from_shape_fn(a.dim(), |(i, j)| inv[(i, j)]))
}

fn to_dmatrix(a: &Array2<f64>) -> DMatrix<f64> {
    let (n, p) = a.dim();
    DMatrix::from_fn(n, p, |i, j| a[[i, j]])
}
