//! Wind components from reanalysis products.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use slr_calendar::Resolution;
use slr_series::Observations;
use slr_stats::{fill_with_mean, mean, nanmean, sd};
use tracing::debug;

use crate::error::ForcingError;

const U: &str = "u";
const V: &str = "v";

/// `x² · sign(x)`: squared magnitude keeping the direction of the component.
pub fn signed_square(x: f64) -> f64 {
    x * x.abs()
}

/// Zonal (`u`, eastward) and meridional (`v`, northward) wind at one
/// reference point, on a year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct WindSeries {
    obs: Observations,
}

impl WindSeries {
    /// Creates a wind series; missing values are `NaN`.
    ///
    /// # Errors
    ///
    /// [`ForcingError::Series`] for an invalid year axis or component length.
    pub fn new(years: Vec<f64>, u: Vec<f64>, v: Vec<f64>) -> Result<Self, ForcingError> {
        let obs = Observations::new(years)?
            .with_column(U, u)?
            .with_column(V, v)?;
        Ok(Self { obs })
    }

    pub fn years(&self) -> &[f64] {
        self.obs.years()
    }

    pub fn u(&self) -> &[f64] {
        self.obs.get(U).unwrap_or_default()
    }

    pub fn v(&self) -> &[f64] {
        self.obs.get(V).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.obs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    pub fn resolution(&self) -> Resolution {
        self.obs.resolution()
    }

    /// `(year, month)` key of every row.
    pub fn month_keys(&self) -> Result<Vec<(i32, u32)>, ForcingError> {
        Ok(self.obs.month_keys()?)
    }

    /// Signed squared `u`; missing values replaced by the mean.
    pub fn u2(&self) -> Vec<f64> {
        signed_square_filled(self.u())
    }

    /// Signed squared `v`; missing values replaced by the mean.
    pub fn v2(&self) -> Vec<f64> {
        signed_square_filled(self.v())
    }

    /// Wind speed `sqrt(u² + v²)`.
    pub fn speed(&self) -> Vec<f64> {
        self.u()
            .iter()
            .zip(self.v())
            .map(|(u, v)| u.hypot(*v))
            .collect()
    }

    /// Direction the wind blows towards, counter-clockwise from east, in `[0, 2π)`.
    pub fn direction(&self) -> Vec<f64> {
        self.u()
            .iter()
            .zip(self.v())
            .map(|(u, v)| v.atan2(*u).rem_euclid(TAU))
            .collect()
    }
}

pub(crate) fn signed_square_filled(values: &[f64]) -> Vec<f64> {
    let squared: Vec<f64> = values.iter().map(|&x| signed_square(x)).collect();
    fill_with_mean(&squared)
}

/// Calendar-year means of `u` and `v`, stamped with whole years.
///
/// Missing values are skipped; a year without any value stays `NaN`.
///
/// # Errors
///
/// [`ForcingError::Calendar`] if a year cannot be converted to a date.
pub fn annual_means(wind: &WindSeries) -> Result<WindSeries, ForcingError> {
    let mut groups: BTreeMap<i32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for (((year, _), u), v) in wind.month_keys()?.into_iter().zip(wind.u()).zip(wind.v()) {
        let entry = groups.entry(year).or_default();
        entry.0.push(*u);
        entry.1.push(*v);
    }
    let years = groups.keys().map(|&y| y as f64).collect();
    let u = groups
        .values()
        .map(|(u, _)| nanmean(u).unwrap_or(f64::NAN))
        .collect();
    let v = groups
        .values()
        .map(|(_, v)| nanmean(v).unwrap_or(f64::NAN))
        .collect();
    WindSeries::new(years, u, v)
}

/// Extends the `newer` product back in time with a rescaled `older` one.
///
/// Over the overlap (from the first year of `newer` to the last year of
/// `older`) each component of `older` is shifted and scaled to the mean and
/// standard deviation of `newer`. The result is the rescaled `older`
/// strictly before `newer` starts, followed by all of `newer`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ForcingError::EmptySeries`] | either product has no rows |
/// | [`ForcingError::NoOverlap`] | fewer than two rows in the overlap |
pub fn combine_linear_scaling(
    older: &WindSeries,
    newer: &WindSeries,
) -> Result<WindSeries, ForcingError> {
    let (Some(&start), Some(&end)) = (newer.years().first(), older.years().last()) else {
        let what = if older.is_empty() {
            "older wind product"
        } else {
            "newer wind product"
        };
        return Err(ForcingError::EmptySeries { what });
    };

    let in_overlap = |y: f64| y >= start && y <= end;
    let older_idx: Vec<usize> = (0..older.len())
        .filter(|&i| in_overlap(older.years()[i]))
        .collect();
    let newer_idx: Vec<usize> = (0..newer.len())
        .filter(|&i| in_overlap(newer.years()[i]))
        .collect();
    let rows = older_idx.len().min(newer_idx.len());
    if rows < 2 {
        return Err(ForcingError::NoOverlap { rows });
    }

    let rescale = |old: &[f64], new: &[f64]| -> Vec<f64> {
        let o: Vec<f64> = finite_at(old, &older_idx);
        let n: Vec<f64> = finite_at(new, &newer_idx);
        let (mo, mn) = (mean(&o), mean(&n));
        let so = sd(&o);
        let factor = if so > 0.0 { sd(&n) / so } else { 1.0 };
        old.iter().map(|x| (x - mo) * factor + mn).collect()
    };
    let u_scaled = rescale(older.u(), newer.u());
    let v_scaled = rescale(older.v(), newer.v());

    let head: Vec<usize> = (0..older.len())
        .filter(|&i| older.years()[i] < start)
        .collect();
    debug!(
        overlap = rows,
        prepended = head.len(),
        "combined wind products"
    );

    let years = head
        .iter()
        .map(|&i| older.years()[i])
        .chain(newer.years().iter().copied())
        .collect();
    let u = head
        .iter()
        .map(|&i| u_scaled[i])
        .chain(newer.u().iter().copied())
        .collect();
    let v = head
        .iter()
        .map(|&i| v_scaled[i])
        .chain(newer.v().iter().copied())
        .collect();
    WindSeries::new(years, u, v)
}

fn finite_at(values: &[f64], idx: &[usize]) -> Vec<f64> {
    idx.iter()
        .map(|&i| values[i])
        .filter(|x| x.is_finite())
        .collect()
}

/// Squared wind speed along and across a coastline.
#[derive(Debug, Clone, PartialEq)]
pub struct CoastalComponents {
    pub along: Vec<f64>,
    pub across: Vec<f64>,
}

/// Projects the squared wind speed onto a coastline whose orientation
/// `alpha_deg` is measured in degrees clockwise from north.
///
/// Missing values are replaced by the component mean.
///
/// # Errors
///
/// [`ForcingError::LengthMismatch`] if `u` and `v` differ in length.
pub fn coastal_components(
    u: &[f64],
    v: &[f64],
    alpha_deg: f64,
) -> Result<CoastalComponents, ForcingError> {
    if u.len() != v.len() {
        return Err(ForcingError::LengthMismatch {
            what: "v component",
            expected: u.len(),
            got: v.len(),
        });
    }
    // compass bearing to mathematical angle
    let alpha = (90.0 - alpha_deg).to_radians();
    let (along, across): (Vec<f64>, Vec<f64>) = u
        .iter()
        .zip(v)
        .map(|(&u, &v)| {
            let s2 = u * u + v * v;
            let angle = v.atan2(u) - alpha;
            (s2 * angle.cos(), s2 * angle.sin())
        })
        .unzip();
    Ok(CoastalComponents {
        along: fill_with_mean(&along),
        across: fill_with_mean(&across),
    })
}
