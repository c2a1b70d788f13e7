//! Averaging several tide gauges into one regional series.

use std::collections::BTreeMap;

use slr_series::Observations;
use slr_stats::nanmean;
use tracing::debug;

use crate::error::ForcingError;

/// First year kept by the regional mean of the Dutch main stations.
pub const MIN_YEAR: f64 = 1890.0;

/// Per-time-step mean of `columns` across `stations`.
///
/// Rows are grouped by calendar month; the year stamp of each group is the
/// mean of the member stamps. Missing values are skipped, so a step where
/// only some stations report still gets a value. Rows before `min_year` are
/// dropped.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ForcingError::EmptySeries`] | `stations` is empty |
/// | [`ForcingError::Series`] | a station lacks one of `columns` |
pub fn station_mean(
    stations: &[Observations],
    columns: &[&str],
    min_year: f64,
) -> Result<Observations, ForcingError> {
    if stations.is_empty() {
        return Err(ForcingError::EmptySeries { what: "station list" });
    }

    // (year stamps, one bucket per column)
    let mut groups: BTreeMap<(i32, u32), (Vec<f64>, Vec<Vec<f64>>)> = BTreeMap::new();
    for station in stations {
        let values = columns
            .iter()
            .map(|c| station.column(c))
            .collect::<Result<Vec<_>, _>>()?;
        for (row, key) in station.month_keys()?.into_iter().enumerate() {
            let (years, buckets) = groups
                .entry(key)
                .or_insert_with(|| (Vec::new(), vec![Vec::new(); columns.len()]));
            years.push(station.years()[row]);
            for (bucket, column) in buckets.iter_mut().zip(&values) {
                bucket.push(column[row]);
            }
        }
    }

    let groups: Vec<_> = groups
        .into_values()
        .filter_map(|(years, buckets)| {
            let year = nanmean(&years)?;
            (year >= min_year).then_some((year, buckets))
        })
        .collect();
    debug!(
        stations = stations.len(),
        rows = groups.len(),
        min_year,
        "station mean"
    );

    let mut out = Observations::new(groups.iter().map(|(y, _)| *y).collect())?;
    for (j, name) in columns.iter().enumerate() {
        let values = groups
            .iter()
            .map(|(_, b)| nanmean(&b[j]).unwrap_or(f64::NAN))
            .collect();
        out.set_column(*name, values)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge(years: Vec<f64>, height: Vec<f64>) -> Observations {
        Observations::new(years)
            .unwrap()
            .with_column("height", height)
            .unwrap()
    }

    #[test]
    fn averages_matching_years_and_skips_missing() {
        let a = gauge(vec![1900.0, 1901.0, 1902.0], vec![10.0, 20.0, f64::NAN]);
        let b = gauge(vec![1901.0, 1902.0], vec![40.0, 50.0]);
        let m = station_mean(&[a, b], &["height"], MIN_YEAR).unwrap();
        assert_eq!(m.years(), &[1900.0, 1901.0, 1902.0]);
        assert_eq!(m.column("height").unwrap(), &[10.0, 30.0, 50.0]);
    }

    #[test]
    fn drops_years_before_minimum() {
        let a = gauge(vec![1880.0, 1889.0, 1890.0, 1891.0], vec![1.0, 2.0, 3.0, 4.0]);
        let m = station_mean(&[a], &["height"], MIN_YEAR).unwrap();
        assert_eq!(m.years(), &[1890.0, 1891.0]);
    }

    #[test]
    fn missing_column_and_empty_input() {
        let a = gauge(vec![1900.0], vec![1.0]);
        assert!(matches!(
            station_mean(&[a], &["u2"], MIN_YEAR),
            Err(ForcingError::Series(_))
        ));
        assert_eq!(
            station_mean(&[], &["height"], MIN_YEAR).unwrap_err(),
            ForcingError::EmptySeries { what: "station list" }
        );
    }
}
