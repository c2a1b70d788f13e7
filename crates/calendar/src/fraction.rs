//! Year fraction ↔ calendar date conversions.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::CalendarError;

/// Number of monthly bins in one year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Converts a timestamp to a fractional year.
///
/// The fraction is the elapsed time since January 1 divided by the length
/// of that calendar year, so leap years are 366 days long.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] if January 1 of the following
/// year cannot be represented.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use slr_calendar::year_fraction;
///
/// let dt = NaiveDate::from_ymd_opt(2001, 7, 2).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let y = year_fraction(dt).unwrap();
/// assert!((y - 2001.5).abs() < 1e-9);
/// ```
pub fn year_fraction(dt: NaiveDateTime) -> Result<f64, CalendarError> {
    let year = dt.year();
    let start = start_of_year(year)?;
    let next = start_of_year(year + 1)?;

    let elapsed = (dt - start).num_milliseconds() as f64;
    let length = (next - start).num_milliseconds() as f64;
    Ok(year as f64 + elapsed / length)
}

/// Converts a calendar date (at midnight) to a fractional year.
///
/// # Errors
///
/// See [`year_fraction`].
pub fn date_fraction(date: NaiveDate) -> Result<f64, CalendarError> {
    let dt = date
        .and_hms_opt(0, 0, 0)
        .ok_or(CalendarError::OutOfRange {
            year: date.year() as i64,
        })?;
    year_fraction(dt)
}

/// Converts a fractional year to the first day of the month it falls in.
///
/// The fractional part is binned against the twelve month start points
/// `k / 12`. A value lying exactly on a start point belongs to the month
/// *before* it, so `(0, 1/12]` is January and `(1/12, 2/12]` is February.
/// A zero fraction (annual-resolution data) maps to January.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`CalendarError::NonFiniteYear`] | `year` is NaN or infinite |
/// | [`CalendarError::OutOfRange`] | the whole year is not representable |
///
/// # Example
///
/// ```
/// use slr_calendar::year_to_date;
///
/// let date = year_to_date(1993.125).unwrap();
/// assert_eq!(date.to_string(), "1993-02-01");
/// ```
pub fn year_to_date(year: f64) -> Result<NaiveDate, CalendarError> {
    if !year.is_finite() {
        return Err(CalendarError::NonFiniteYear { year });
    }
    let whole = year.floor();
    if whole < i32::MIN as f64 || whole > i32::MAX as f64 {
        return Err(CalendarError::OutOfRange { year: whole as i64 });
    }
    let month = month_bin(year - whole).max(1);
    NaiveDate::from_ymd_opt(whole as i32, month, 1)
        .ok_or(CalendarError::OutOfRange { year: whole as i64 })
}

/// Vector form of [`year_to_date`].
///
/// # Errors
///
/// Returns the first conversion error encountered.
pub fn years_to_dates(years: &[f64]) -> Result<Vec<NaiveDate>, CalendarError> {
    years.iter().map(|&y| year_to_date(y)).collect()
}

/// Returns the mid-month year stamp `year + (month - 0.5) / 12`.
///
/// This is the convention used for monthly mean sea-level records.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is not in `1..=12`.
pub fn month_midpoint(year: i32, month: u32) -> Result<f64, CalendarError> {
    if !(1..=MONTHS_PER_YEAR).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok(year as f64 + (month as f64 - 0.5) / MONTHS_PER_YEAR as f64)
}

/// Number of month start points strictly below `remainder` (left-sided search).
fn month_bin(remainder: f64) -> u32 {
    let step = 1.0 / MONTHS_PER_YEAR as f64;
    (0..MONTHS_PER_YEAR)
        .filter(|&k| k as f64 * step < remainder)
        .count() as u32
}

fn start_of_year(year: i32) -> Result<NaiveDateTime, CalendarError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or(CalendarError::OutOfRange { year: year as i64 })
}
