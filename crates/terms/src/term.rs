//! Typed regression terms.

use std::fmt;

use serde::Serialize;

/// A regressor kind in a sea-level model.
///
/// Every term appears at most once in a design matrix, so a `Term` is a
/// stable key for coefficients and columns whatever the column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Term {
    Constant,
    Trend,
    Acceleration,
    /// Additional trend after a break year.
    TrendChange,
    NodalU,
    NodalV,
    WindU2,
    WindV2,
}

impl Term {
    /// Returns true for the wind terms.
    pub fn is_wind(self) -> bool {
        matches!(self, Term::WindU2 | Term::WindV2)
    }

    /// Returns true for the nodal tide terms.
    pub fn is_nodal(self) -> bool {
        matches!(self, Term::NodalU | Term::NodalV)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Term::Constant => "Constant",
            Term::Trend => "Trend",
            Term::Acceleration => "Acceleration",
            Term::TrendChange => "+trend",
            Term::NodalU => "Nodal U",
            Term::NodalV => "Nodal V",
            Term::WindU2 => "Wind u²",
            Term::WindV2 => "Wind v²",
        };
        f.write_str(s)
    }
}

/// A design-matrix column: its term and the human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermColumn {
    pub term: Term,
    pub label: String,
}

impl TermColumn {
    pub fn new(term: Term, label: impl Into<String>) -> Self {
        Self {
            term,
            label: label.into(),
        }
    }

    /// A column whose label is the term's plain name.
    pub fn plain(term: Term) -> Self {
        Self::new(term, term.to_string())
    }
}
