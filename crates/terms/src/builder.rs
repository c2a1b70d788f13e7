//! Design-matrix construction from an observation series.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};
use slr_series::Observations;
use tracing::{debug, info};

use crate::config::{NODAL_EPOCH, NODAL_PERIOD, TermConfig, TrendShape, U2_COLUMN, V2_COLUMN};
use crate::design::DesignMatrix;
use crate::error::TermError;
use crate::term::{Term, TermColumn};

/// Builds the design matrix for `config` over `obs`.
///
/// Columns are, in order: the constant, the trend terms of the
/// [`TrendShape`], the nodal pair (if enabled) and the wind pair (if
/// enabled). Rows where the response or any regressor is not finite are
/// dropped.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`TermError::MissingColumn`] | response, `u2` or `v2` column absent |
/// | [`TermError::NoObservations`] | no row survives the missing-value drop |
///
/// # Example
///
/// ```
/// use slr_series::Observations;
/// use slr_terms::{build_design, Term, TermConfig, TrendShape};
///
/// let obs = Observations::new(vec![1970.0, 1971.0, 1972.0])
///     .unwrap()
///     .with_column("height", vec![1.0, 2.0, 3.0])
///     .unwrap();
/// let config = TermConfig::new(TrendShape::Linear { epoch: 1970 })
///     .with_nodal(false)
///     .with_wind(false);
/// let design = build_design(&obs, &config).unwrap();
/// assert_eq!(design.names(), vec!["Constant", "Trend"]);
/// assert_eq!(design.index_of(Term::Trend), Some(1));
/// ```
pub fn build_design(obs: &Observations, config: &TermConfig) -> Result<DesignMatrix, TermError> {
    let years = obs.years();
    let endog = require(obs, config.quantity())?;

    let mut columns: Vec<(TermColumn, Vec<f64>)> = Vec::new();
    columns.push((
        TermColumn::new(Term::Constant, config.trend().constant_label()),
        vec![1.0; years.len()],
    ));
    columns.extend(trend_columns(years, config.trend()));

    if config.nodal() {
        let (u, v) = nodal_columns(years);
        columns.push((TermColumn::plain(Term::NodalU), u));
        columns.push((TermColumn::plain(Term::NodalV), v));
    }

    if config.wind() {
        let u2 = require(obs, U2_COLUMN)?;
        let v2 = require(obs, V2_COLUMN)?;
        columns.push((TermColumn::plain(Term::WindU2), u2.to_vec()));
        columns.push((TermColumn::plain(Term::WindV2), v2.to_vec()));
    }

    let rows: Vec<usize> = (0..years.len())
        .filter(|&i| endog[i].is_finite() && columns.iter().all(|(_, v)| v[i].is_finite()))
        .collect();
    let n_dropped = years.len() - rows.len();

    if rows.is_empty() {
        return Err(TermError::NoObservations { dropped: n_dropped });
    }
    if n_dropped > 0 {
        info!(
            quantity = config.quantity(),
            dropped = n_dropped,
            kept = rows.len(),
            "dropped rows with missing values"
        );
    } else {
        debug!(quantity = config.quantity(), kept = rows.len(), "no rows dropped");
    }

    let exog = Array2::from_shape_fn((rows.len(), columns.len()), |(i, j)| columns[j].1[rows[i]]);
    let endog: Array1<f64> = rows.iter().map(|&i| endog[i]).collect();
    let kept_years: Vec<f64> = rows.iter().map(|&i| years[i]).collect();
    let labels = columns.into_iter().map(|(c, _)| c).collect();

    DesignMatrix::new(
        labels,
        exog,
        endog,
        kept_years,
        rows,
        n_dropped,
        config.quantity(),
    )
}

fn require<'a>(obs: &'a Observations, name: &str) -> Result<&'a [f64], TermError> {
    obs.get(name).ok_or_else(|| TermError::MissingColumn {
        name: name.to_string(),
    })
}

fn trend_columns(years: &[f64], shape: TrendShape) -> Vec<(TermColumn, Vec<f64>)> {
    let since = |origin: f64| -> Vec<f64> { years.iter().map(|&y| y - origin).collect() };
    match shape {
        TrendShape::Linear { epoch } => {
            vec![(TermColumn::plain(Term::Trend), since(epoch as f64))]
        }
        TrendShape::Quadratic { epoch } => {
            let t = since(epoch as f64);
            let t2 = t.iter().map(|x| x * x).collect();
            vec![
                (TermColumn::plain(Term::Trend), t),
                (TermColumn::plain(Term::Acceleration), t2),
            ]
        }
        TrendShape::BrokenLinear { epoch, break_year } => {
            let b = break_year as f64;
            let extra = years
                .iter()
                .map(|&y| if y > b { y - b } else { 0.0 })
                .collect();
            vec![
                (TermColumn::plain(Term::Trend), since(epoch as f64)),
                (
                    TermColumn::new(Term::TrendChange, format!("+trend ({break_year})")),
                    extra,
                ),
            ]
        }
        TrendShape::BrokenQuadratic { start_acceleration } => {
            let s = start_acceleration as f64;
            let t = since(s);
            let acc = years
                .iter()
                .map(|&y| if y >= s { (y - s) * (y - s) } else { 0.0 })
                .collect();
            vec![
                (TermColumn::plain(Term::Trend), t),
                (
                    TermColumn::new(
                        Term::Acceleration,
                        format!("Acceleration from {start_acceleration}"),
                    ),
                    acc,
                ),
            ]
        }
    }
}

fn nodal_columns(years: &[f64]) -> (Vec<f64>, Vec<f64>) {
    years
        .iter()
        .map(|&y| {
            let phase = 2.0 * PI * (y - NODAL_EPOCH) / NODAL_PERIOD;
            (phase.cos(), phase.sin())
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn obs(years: Vec<f64>) -> Observations {
        let n = years.len();
        Observations::new(years)
            .unwrap()
            .with_column("height", (0..n).map(|i| i as f64).collect())
            .unwrap()
            .with_column("u2", vec![0.5; n])
            .unwrap()
            .with_column("v2", vec![-0.5; n])
            .unwrap()
    }

    #[test]
    fn full_linear_layout() {
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 });
        let dm = build_design(&obs(vec![1969.0, 1970.0, 1971.0]), &cfg).unwrap();
        assert_eq!(
            dm.names(),
            vec!["Constant", "Trend", "Nodal U", "Nodal V", "Wind u²", "Wind v²"]
        );
        assert_eq!(dm.column(Term::Trend).unwrap().to_vec(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(dm.column(Term::WindV2).unwrap().to_vec(), vec![-0.5; 3]);
    }

    #[test]
    fn quadratic_layout() {
        let cfg = TermConfig::new(TrendShape::Quadratic { epoch: 1970 }).with_wind(false);
        let dm = build_design(&obs(vec![1968.0, 1970.0, 1972.0]), &cfg).unwrap();
        assert_eq!(
            dm.names(),
            vec!["Constant (in year 1970)", "Trend", "Acceleration", "Nodal U", "Nodal V"]
        );
        assert_eq!(
            dm.column(Term::Acceleration).unwrap().to_vec(),
            vec![4.0, 0.0, 4.0]
        );
    }

    #[test]
    fn broken_linear_kink_is_strict() {
        let cfg = TermConfig::new(TrendShape::BrokenLinear {
            epoch: 1970,
            break_year: 1993,
        })
        .with_wind(false)
        .with_nodal(false);
        let dm = build_design(&obs(vec![1992.0, 1993.0, 1995.0]), &cfg).unwrap();
        assert_eq!(dm.label(Term::TrendChange), Some("+trend (1993)"));
        assert_eq!(
            dm.column(Term::TrendChange).unwrap().to_vec(),
            vec![0.0, 0.0, 2.0]
        );
    }

    #[test]
    fn broken_quadratic_mask_is_inclusive() {
        let cfg = TermConfig::new(TrendShape::BrokenQuadratic {
            start_acceleration: 1960,
        })
        .with_wind(false)
        .with_nodal(false);
        let dm = build_design(&obs(vec![1958.0, 1960.0, 1963.0]), &cfg).unwrap();
        assert_eq!(
            dm.names(),
            vec!["Constant (in year 1960)", "Trend", "Acceleration from 1960"]
        );
        assert_eq!(dm.column(Term::Trend).unwrap().to_vec(), vec![-2.0, 0.0, 3.0]);
        assert_eq!(
            dm.column(Term::Acceleration).unwrap().to_vec(),
            vec![0.0, 0.0, 9.0]
        );
    }

    #[test]
    fn nodal_anchored_at_1970_whatever_the_epoch() {
        let cfg = TermConfig::new(TrendShape::BrokenQuadratic {
            start_acceleration: 1960,
        })
        .with_wind(false);
        let dm = build_design(&obs(vec![1970.0, 1970.0 + NODAL_PERIOD / 4.0]), &cfg).unwrap();
        let u = dm.column(Term::NodalU).unwrap();
        let v = dm.column(Term::NodalV).unwrap();
        assert_relative_eq!(u[0], 1.0);
        assert_relative_eq!(v[0], 0.0);
        assert_relative_eq!(u[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_wind_column() {
        let o = Observations::new(vec![1970.0])
            .unwrap()
            .with_column("height", vec![1.0])
            .unwrap();
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 });
        let err = build_design(&o, &cfg).unwrap_err();
        assert_eq!(
            err,
            TermError::MissingColumn {
                name: "u2".to_string()
            }
        );
    }

    #[test]
    fn missing_response_column() {
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 }).with_quantity("surge");
        let err = build_design(&obs(vec![1970.0]), &cfg).unwrap_err();
        assert_eq!(
            err,
            TermError::MissingColumn {
                name: "surge".to_string()
            }
        );
    }

    #[test]
    fn rows_with_missing_values_dropped() {
        let o = Observations::new(vec![1970.0, 1971.0, 1972.0, 1973.0])
            .unwrap()
            .with_column("height", vec![1.0, f64::NAN, 3.0, 4.0])
            .unwrap()
            .with_column("u2", vec![0.0, 0.0, 0.0, f64::NAN])
            .unwrap()
            .with_column("v2", vec![0.0; 4])
            .unwrap();
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 });
        let dm = build_design(&o, &cfg).unwrap();
        assert_eq!(dm.nobs(), 2);
        assert_eq!(dm.n_dropped(), 2);
        assert_eq!(dm.rows(), &[0, 2]);
        assert_eq!(dm.years(), &[1970.0, 1972.0]);
        assert_eq!(dm.endog().to_vec(), vec![1.0, 3.0]);
    }

    #[test]
    fn missing_wind_values_ignored_without_wind_terms() {
        let o = Observations::new(vec![1970.0, 1971.0])
            .unwrap()
            .with_column("height", vec![1.0, 2.0])
            .unwrap()
            .with_column("u2", vec![f64::NAN, f64::NAN])
            .unwrap();
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 }).with_wind(false);
        let dm = build_design(&o, &cfg).unwrap();
        assert_eq!(dm.n_dropped(), 0);
    }

    #[test]
    fn all_rows_missing() {
        let o = Observations::new(vec![1970.0, 1971.0])
            .unwrap()
            .with_column("height", vec![f64::NAN, f64::NAN])
            .unwrap();
        let cfg = TermConfig::new(TrendShape::Linear { epoch: 1970 }).with_wind(false);
        let err = build_design(&o, &cfg).unwrap_err();
        assert_eq!(err, TermError::NoObservations { dropped: 2 });
    }
}
