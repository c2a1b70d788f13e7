//! Year axis plus named columns.

use chrono::{Datelike, NaiveDate};
use slr_calendar::{Resolution, infer_resolution, years_to_dates};

use crate::error::SeriesError;

/// Time-ordered observations with a continuous year axis.
///
/// Every column has exactly one value per year; column names are unique and
/// keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Observations {
    years: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl Observations {
    /// Creates an empty-column series over `years`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::NonFiniteYear`] | a year is NaN or infinite |
    /// | [`SeriesError::UnorderedYears`] | a year is smaller than its predecessor |
    pub fn new(years: Vec<f64>) -> Result<Self, SeriesError> {
        for (index, &year) in years.iter().enumerate() {
            if !year.is_finite() {
                return Err(SeriesError::NonFiniteYear { index, year });
            }
            if index > 0 && year < years[index - 1] {
                return Err(SeriesError::UnorderedYears { index });
            }
        }
        Ok(Self {
            years,
            columns: Vec::new(),
        })
    }

    /// Adds a column, consuming and returning the series.
    ///
    /// # Errors
    ///
    /// [`SeriesError::DuplicateColumn`] if `name` exists,
    /// [`SeriesError::LengthMismatch`] if `values` has the wrong length.
    ///
    /// # Example
    ///
    /// ```
    /// use slr_series::Observations;
    ///
    /// let obs = Observations::new(vec![1990.0, 1991.0])
    ///     .unwrap()
    ///     .with_column("height", vec![7010.0, 7014.0])
    ///     .unwrap();
    /// assert_eq!(obs.column("height").unwrap(), &[7010.0, 7014.0]);
    /// ```
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(SeriesError::DuplicateColumn { name });
        }
        self.check_length(&name, &values)?;
        self.columns.push((name, values));
        Ok(self)
    }

    /// Inserts a column, replacing an existing one of the same name in place.
    ///
    /// # Errors
    ///
    /// [`SeriesError::LengthMismatch`] if `values` has the wrong length.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
    ) -> Result<(), SeriesError> {
        let name = name.into();
        self.check_length(&name, &values)?;
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = values,
            None => self.columns.push((name, values)),
        }
        Ok(())
    }

    /// Returns the values of column `name`.
    ///
    /// # Errors
    ///
    /// [`SeriesError::MissingColumn`] if no such column exists.
    pub fn column(&self, name: &str) -> Result<&[f64], SeriesError> {
        self.get(name).ok_or_else(|| SeriesError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Returns the values of column `name`, if present.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn years(&self) -> &[f64] {
        &self.years
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Returns a new series holding only the rows at `indices`, in that order.
    ///
    /// # Errors
    ///
    /// [`SeriesError::RowOutOfBounds`] for an index past the end, or
    /// [`SeriesError::UnorderedYears`] if the selection breaks time order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self, SeriesError> {
        let len = self.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(SeriesError::RowOutOfBounds { index, len });
        }
        let years = indices.iter().map(|&i| self.years[i]).collect();
        let mut out = Self::new(years)?;
        out.columns = self
            .columns
            .iter()
            .map(|(n, v)| (n.clone(), indices.iter().map(|&i| v[i]).collect()))
            .collect();
        Ok(out)
    }

    /// Keeps the rows whose year satisfies `keep`.
    pub fn filter_years(&self, keep: impl Fn(f64) -> bool) -> Self {
        let indices: Vec<usize> = (0..self.len()).filter(|&i| keep(self.years[i])).collect();
        Self {
            years: indices.iter().map(|&i| self.years[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(n, v)| (n.clone(), indices.iter().map(|&i| v[i]).collect()))
                .collect(),
        }
    }

    /// Calendar date (first of the month) of every row.
    ///
    /// # Errors
    ///
    /// Propagates [`SeriesError::Calendar`] from the year conversion.
    pub fn dates(&self) -> Result<Vec<NaiveDate>, SeriesError> {
        Ok(years_to_dates(&self.years)?)
    }

    /// `(year, month)` key of every row, used to join series on calendar month.
    ///
    /// # Errors
    ///
    /// Propagates [`SeriesError::Calendar`] from the year conversion.
    pub fn month_keys(&self) -> Result<Vec<(i32, u32)>, SeriesError> {
        Ok(self
            .dates()?
            .into_iter()
            .map(|d| (d.year(), d.month()))
            .collect())
    }

    /// Sampling resolution inferred from the year axis.
    pub fn resolution(&self) -> Resolution {
        infer_resolution(&self.years)
    }

    fn check_length(&self, name: &str, values: &[f64]) -> Result<(), SeriesError> {
        if values.len() != self.years.len() {
            return Err(SeriesError::LengthMismatch {
                column: name.to_string(),
                expected: self.years.len(),
                got: values.len(),
            });
        }
        Ok(())
    }
}
