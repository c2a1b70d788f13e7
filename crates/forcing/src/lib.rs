//! # slr-forcing
//!
//! Prepares the external forcing of sea-level models: wind from reanalysis
//! products and storm-surge estimates, joined onto tide-gauge series by
//! calendar month. Also aggregates several stations into one mean series.
//!
//! ```mermaid
//! graph LR
//!     A["WindSeries (older)"] -->|"combine_linear_scaling()"| C["WindSeries"]
//!     B["WindSeries (newer)"] --> C
//!     C -->|"attach_wind(&obs, &wind)?"| D["Observations + u, v, u2, v2"]
//!     E["SurgeSeries"] -->|"attach_surge(&obs, &surge, q)?"| F["Observations + surge"]
//!     G["[Observations]"] -->|"station_mean()"| H["Observations"]
//! ```
//!
//! Values are supplied by the caller; nothing here reads files or caches
//! reference data.

mod error;
mod join;
mod station;
mod surge;
mod wind;

pub use error::ForcingError;
pub use join::attach_wind;
pub use station::{MIN_YEAR, station_mean};
pub use surge::{SurgeSeries, attach_surge};
pub use wind::{
    CoastalComponents, WindSeries, annual_means, coastal_components, combine_linear_scaling,
    signed_square,
};
