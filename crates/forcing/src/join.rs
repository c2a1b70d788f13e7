//! Calendar-month joins between observations and forcing series.

use std::collections::HashMap;

use slr_calendar::Resolution;
use slr_series::Observations;
use slr_stats::fill_with_mean;
use tracing::{debug, info};

use crate::error::ForcingError;
use crate::wind::{WindSeries, annual_means, signed_square_filled};

pub(crate) type JoinKey = (i32, u32);

/// Join keys of a year axis: `(year, month)` for monthly data, `(year, 0)`
/// for annual data so that any stamp inside a year matches.
pub(crate) fn join_keys(
    obs: &Observations,
    resolution: Resolution,
) -> Result<Vec<JoinKey>, ForcingError> {
    let keys = obs.month_keys()?;
    Ok(match resolution {
        Resolution::Monthly => keys,
        Resolution::Annual => keys.into_iter().map(|(y, _)| (y, 0)).collect(),
    })
}

/// Looks up `values` by key for every row of `target`; unmatched rows are `NaN`.
pub(crate) fn left_join(target: &[JoinKey], source: &[JoinKey], values: &[f64]) -> (Vec<f64>, usize) {
    let index: HashMap<JoinKey, usize> = source.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    let mut unmatched = 0;
    let joined = target
        .iter()
        .map(|k| match index.get(k) {
            Some(&i) => values[i],
            None => {
                unmatched += 1;
                f64::NAN
            }
        })
        .collect();
    (joined, unmatched)
}

/// Adds `u`, `v`, `u2` and `v2` columns from `wind` to `obs`.
///
/// Annual observations are joined with calendar-year wind means, monthly
/// ones month by month. Rows without wind, and missing wind values, are
/// filled with the column mean. Existing columns of the same name are
/// replaced.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ForcingError::ResolutionMismatch`] | `obs` is monthly and `wind` annual |
/// | [`ForcingError::Calendar`] | a year cannot be converted to a date |
pub fn attach_wind(obs: &Observations, wind: &WindSeries) -> Result<Observations, ForcingError> {
    let resolution = obs.resolution();
    let aggregated;
    let wind = match (resolution, wind.resolution()) {
        (Resolution::Annual, Resolution::Monthly) => {
            aggregated = annual_means(wind)?;
            &aggregated
        }
        (Resolution::Monthly, Resolution::Annual) => {
            return Err(ForcingError::ResolutionMismatch { what: "wind" });
        }
        _ => wind,
    };

    let target = join_keys(obs, resolution)?;
    let source: Vec<JoinKey> = wind
        .month_keys()?
        .into_iter()
        .map(|(y, m)| if resolution == Resolution::Annual { (y, 0) } else { (y, m) })
        .collect();

    let (u, unmatched) = left_join(&target, &source, wind.u());
    let (v, _) = left_join(&target, &source, wind.v());
    if unmatched > 0 {
        info!(unmatched, rows = obs.len(), "observations without wind, filled with mean");
    } else {
        debug!(rows = obs.len(), "wind attached");
    }

    let mut out = obs.clone();
    out.set_column("u2", signed_square_filled(&u))?;
    out.set_column("v2", signed_square_filled(&v))?;
    out.set_column("u", fill_with_mean(&u))?;
    out.set_column("v", fill_with_mean(&v))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_join_marks_unmatched() {
        let (out, unmatched) = left_join(&[(2000, 1), (2000, 2)], &[(2000, 2)], &[5.0]);
        assert!(out[0].is_nan());
        assert_eq!(out[1], 5.0);
        assert_eq!(unmatched, 1);
    }

    #[test]
    fn annual_keys_ignore_month() {
        let obs = Observations::new(vec![1990.0, 1991.5]).unwrap();
        let keys = join_keys(&obs, Resolution::Annual).unwrap();
        assert_eq!(keys, vec![(1990, 0), (1991, 0)]);
    }
}
