//! # slr-calendar
//!
//! Conversions between fractional years and calendar dates for tide-gauge
//! series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["NaiveDateTime"] -->|"year_fraction()"| B["f64 year"]
//!     B -->|"year_to_date()"| C["NaiveDate (1st of month)"]
//!     D["(year, month)"] -->|"month_midpoint()"| B
//!     E["&[f64] years"] -->|"infer_resolution()"| F["Resolution"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use slr_calendar::{year_to_date, month_midpoint, infer_resolution, Resolution};
//!
//! // Monthly PSMSL stamp for February 1993 → 1993-02-01
//! let stamp = month_midpoint(1993, 2)?;
//! let date = year_to_date(stamp)?;
//!
//! // Annual data has no fractional part and maps to January
//! assert_eq!(infer_resolution(&[1990.0, 1991.0]), Resolution::Annual);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `fraction` | Year fraction ↔ date conversions |
//! | `resolution` | Annual vs monthly sampling detection |
//! | `error` | Error types |

mod error;
mod fraction;
mod resolution;

pub use error::CalendarError;
pub use fraction::{
    MONTHS_PER_YEAR, date_fraction, month_midpoint, year_fraction, year_to_date, years_to_dates,
};
pub use resolution::{Resolution, infer_resolution};
