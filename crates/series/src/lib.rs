//! # slr-series
//!
//! Container for tide-gauge and forcing observations: a year axis (whole or
//! fractional years) with named `f64` columns of equal length. Missing values
//! are stored as `NaN`.
//!
//! ```mermaid
//! graph LR
//!     A["Observations::new(years)?"] -->|".with_column(name, values)?"| B["Observations"]
//!     B --> C[".column(name)? -> &[f64]"]
//!     B --> D[".select_rows(&idx)"]
//!     B --> E[".month_keys()? -> (year, month)"]
//! ```

mod error;
mod observations;

pub use error::SeriesError;
pub use observations::Observations;
