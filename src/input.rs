//! CSV readers and forcing assembly for station series.

use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use tracing::info;

use slr_forcing::{SurgeSeries, WindSeries, attach_surge, attach_wind, combine_linear_scaling};
use slr_series::Observations;

use crate::config::IoConfig;

/// Reads a CSV with a header row into [`Observations`].
///
/// Every column except `year_column` must be numeric; empty cells and
/// `NaN` are missing values.
pub fn read_observations(path: &Path, year_column: &str) -> Result<Observations> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open CSV: {}", path.display()))?;
    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("failed to read CSV header: {}", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();
    let Some(year_idx) = headers.iter().position(|h| h == year_column) else {
        bail!("{}: no '{year_column}' column", path.display());
    };

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (row, record) in rdr.records().enumerate() {
        let record =
            record.with_context(|| format!("{}: bad record {}", path.display(), row + 1))?;
        for (j, column) in columns.iter_mut().enumerate() {
            let cell = record.get(j).unwrap_or("");
            let value = parse_cell(cell).with_context(|| {
                format!(
                    "{}: row {}, column '{}': not a number: {cell:?}",
                    path.display(),
                    row + 1,
                    headers[j]
                )
            })?;
            column.push(value);
        }
    }

    let years = std::mem::take(&mut columns[year_idx]);
    let mut obs = Observations::new(years)
        .with_context(|| format!("{}: invalid year column", path.display()))?;
    for (j, (name, values)) in headers.into_iter().zip(columns).enumerate() {
        if j != year_idx {
            obs = obs.with_column(name, values)?;
        }
    }
    Ok(obs)
}

fn parse_cell(cell: &str) -> Result<f64> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    Ok(cell.parse::<f64>()?)
}

/// Reads a wind product with `u` and `v` columns.
pub fn read_wind(path: &Path, year_column: &str) -> Result<WindSeries> {
    let obs = read_observations(path, year_column)?;
    let wind = WindSeries::new(
        obs.years().to_vec(),
        obs.column("u")?.to_vec(),
        obs.column("v")?.to_vec(),
    )?;
    Ok(wind)
}

/// Reads a surge series with a `surge` column in metres.
pub fn read_surge(path: &Path, year_column: &str) -> Result<SurgeSeries> {
    let obs = read_observations(path, year_column)?;
    Ok(SurgeSeries::new(
        obs.years().to_vec(),
        obs.column("surge")?.to_vec(),
    )?)
}

/// Reads a station and merges the configured wind products and surge.
///
/// Several wind products are chained oldest to newest with
/// [`combine_linear_scaling`].
pub fn load_station(path: &Path, io: &IoConfig) -> Result<Observations> {
    info!(path = %path.display(), "reading station");
    let mut obs = read_observations(path, &io.year_column)?;

    let mut wind: Option<WindSeries> = None;
    for product in &io.wind {
        let next = read_wind(product, &io.year_column)
            .with_context(|| format!("failed to read wind product: {}", product.display()))?;
        wind = Some(match wind {
            Some(older) => combine_linear_scaling(&older, &next).with_context(|| {
                format!("failed to combine wind product: {}", product.display())
            })?,
            None => next,
        });
    }
    if let Some(wind) = wind {
        obs = attach_wind(&obs, &wind)?;
    }

    if let Some(ref surge_path) = io.surge {
        let surge = read_surge(surge_path, &io.year_column)
            .with_context(|| format!("failed to read surge: {}", surge_path.display()))?;
        obs = attach_surge(&obs, &surge, &io.quantity)?;
    }
    info!(rows = obs.len(), columns = ?obs.column_names(), "station loaded");
    Ok(obs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_columns_and_missing_values() {
        let f = csv("year,height,u2\n1990,7010,1.5\n1991,,NaN\n1992, 7020 ,2\n");
        let obs = read_observations(f.path(), "year").unwrap();
        assert_eq!(obs.years(), &[1990.0, 1991.0, 1992.0]);
        let h = obs.column("height").unwrap();
        assert_eq!(h[0], 7010.0);
        assert!(h[1].is_nan());
        assert_eq!(h[2], 7020.0);
        assert!(obs.column("u2").unwrap()[1].is_nan());
        assert_eq!(obs.column_names(), vec!["height", "u2"]);
    }

    #[test]
    fn non_numeric_cell_is_an_error() {
        let f = csv("year,height\n1990,abc\n");
        let err = read_observations(f.path(), "year").unwrap_err();
        assert!(format!("{err:#}").contains("column 'height'"));
    }

    #[test]
    fn missing_year_column() {
        let f = csv("time,height\n1990,1\n");
        let err = read_observations(f.path(), "year").unwrap_err();
        assert!(err.to_string().contains("no 'year' column"));
    }

    #[test]
    fn station_with_wind_and_surge() {
        let station = csv("year,height\n2000,100\n2001,110\n2002,120\n");
        let wind = csv("year,u,v\n2000,1,2\n2001,-1,2\n2002,2,0\n");
        let surge = csv("year,surge\n2000,0.01\n2001,0.02\n2002,0.03\n");
        let io = IoConfig {
            wind: vec![wind.path().to_path_buf()],
            surge: Some(surge.path().to_path_buf()),
            ..IoConfig::default()
        };
        let obs = load_station(station.path(), &io).unwrap();
        assert_eq!(obs.column("u2").unwrap(), &[1.0, -1.0, 4.0]);
        assert_eq!(obs.column("v2").unwrap(), &[4.0, 4.0, 0.0]);
        let corrected = obs.column("height - surge").unwrap();
        assert!((corrected[1] - 90.0).abs() < 1e-9);
    }
}
