//! Design matrix with named, typed columns.

use std::collections::HashSet;

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::TermError;
use crate::term::{Term, TermColumn};

/// Regressors, response and row metadata of one model fit.
///
/// Column `j` of [`exog()`](Self::exog) is described by `columns()[j]`; this
/// correspondence is checked on construction. Rows are the complete
/// observations of the source series, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    columns: Vec<TermColumn>,
    exog: Array2<f64>,
    endog: Array1<f64>,
    years: Vec<f64>,
    rows: Vec<usize>,
    n_dropped: usize,
    quantity: String,
}

impl DesignMatrix {
    /// Assembles a design matrix from parts.
    ///
    /// `rows` holds the index of every kept row in the source series and
    /// `n_dropped` the number of rows removed for missing values.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TermError::ShapeMismatch`] | sizes of `exog`, `endog`, `years`, `rows`, `columns` disagree |
    /// | [`TermError::DuplicateTerm`] | a term or label occurs twice |
    pub fn new(
        columns: Vec<TermColumn>,
        exog: Array2<f64>,
        endog: Array1<f64>,
        years: Vec<f64>,
        rows: Vec<usize>,
        n_dropped: usize,
        quantity: impl Into<String>,
    ) -> Result<Self, TermError> {
        let (n, p) = exog.dim();
        check_len("columns", p, columns.len())?;
        check_len("response", n, endog.len())?;
        check_len("years", n, years.len())?;
        check_len("row index", n, rows.len())?;

        let mut terms = HashSet::new();
        let mut labels = HashSet::new();
        for col in &columns {
            if !terms.insert(col.term) || !labels.insert(col.label.as_str()) {
                return Err(TermError::DuplicateTerm {
                    label: col.label.clone(),
                });
            }
        }

        Ok(Self {
            columns,
            exog,
            endog,
            years,
            rows,
            n_dropped,
            quantity: quantity.into(),
        })
    }

    /// Regressor matrix, one row per kept observation.
    pub fn exog(&self) -> &Array2<f64> {
        &self.exog
    }

    /// Response vector.
    pub fn endog(&self) -> &Array1<f64> {
        &self.endog
    }

    pub fn years(&self) -> &[f64] {
        &self.years
    }

    /// Index of each kept row in the source series.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of source rows removed for a missing value.
    pub fn n_dropped(&self) -> usize {
        self.n_dropped
    }

    /// Name of the response column.
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn nobs(&self) -> usize {
        self.exog.nrows()
    }

    pub fn n_params(&self) -> usize {
        self.exog.ncols()
    }

    pub fn columns(&self) -> &[TermColumn] {
        &self.columns
    }

    /// Column labels in column order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// Terms in column order.
    pub fn terms(&self) -> Vec<Term> {
        self.columns.iter().map(|c| c.term).collect()
    }

    pub fn index_of(&self, term: Term) -> Option<usize> {
        self.columns.iter().position(|c| c.term == term)
    }

    pub fn index_of_name(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    pub fn contains(&self, term: Term) -> bool {
        self.index_of(term).is_some()
    }

    /// Label of `term`, if present.
    pub fn label(&self, term: Term) -> Option<&str> {
        self.index_of(term).map(|j| self.columns[j].label.as_str())
    }

    /// Regressor values of `term` over the kept rows.
    pub fn column(&self, term: Term) -> Option<ArrayView1<'_, f64>> {
        self.index_of(term).map(|j| self.exog.column(j))
    }

    /// Sample mean of the regressor `term` over the kept rows.
    pub fn column_mean(&self, term: Term) -> Option<f64> {
        self.column(term).and_then(|c| c.mean())
    }
}

fn check_len(what: &'static str, expected: usize, got: usize) -> Result<(), TermError> {
    if expected != got {
        return Err(TermError::ShapeMismatch {
            what,
            expected,
            got,
        });
    }
    Ok(())
}
