//! Coefficient covariance estimators.

use ndarray::{Array1, Array2};

/// Classical covariance `scale · (X'X)⁻¹`.
pub(crate) fn nonrobust(xtx_inv: &Array2<f64>, scale: f64) -> Array2<f64> {
    xtx_inv.mapv(|v| v * scale)
}

/// White's HC0 sandwich `(X'X)⁻¹ X' diag(e²) X (X'X)⁻¹`.
pub(crate) fn hc0(x: &Array2<f64>, resid: &Array1<f64>, xtx_inv: &Array2<f64>) -> Array2<f64> {
    let p = x.ncols();
    let e2 = resid.mapv(|e| e * e);
    let meat = Array2::from_shape_fn((p, p), |(a, b)| {
        x.column(a)
            .iter()
            .zip(x.column(b).iter())
            .zip(e2.iter())
            .map(|((xa, xb), w)| xa * xb * w)
            .sum::<f64>()
    });
    xtx_inv.dot(&meat).dot(xtx_inv)
}
