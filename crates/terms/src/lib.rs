//! # slr-terms
//!
//! Builds regression design matrices for sea-level trend models: a constant,
//! trend and acceleration terms for the chosen [`TrendShape`], the 18.613-year
//! nodal cycle and the signed squared wind components.
//!
//! ```mermaid
//! graph LR
//!     A["Observations"] -->|"build_design(&obs, &config)?"| B["DesignMatrix"]
//!     C["TermConfig::new(TrendShape)"] --> A
//!     B --> D[".exog() / .endog()"]
//!     B --> E[".names(): ordered labels"]
//!     B --> F[".index_of(Term)"]
//! ```
//!
//! ## Term glossary
//!
//! | Term | Label | Column |
//! |------|-------|--------|
//! | [`Term::Constant`] | `Constant` / `Constant (in year E)` | 1 |
//! | [`Term::Trend`] | `Trend` | `year - E` |
//! | [`Term::Acceleration`] | `Acceleration` / `Acceleration from S` | `(year - E)²`, masked before S |
//! | [`Term::TrendChange`] | `+trend (B)` | `(year > B)·(year - B)` |
//! | [`Term::NodalU`] / [`Term::NodalV`] | `Nodal U` / `Nodal V` | cos / sin of `2π(year - 1970)/18.613` |
//! | [`Term::WindU2`] / [`Term::WindV2`] | `Wind u²` / `Wind v²` | `u2` / `v2` columns |

mod builder;
mod config;
mod design;
mod error;
mod term;

pub use builder::build_design;
pub use config::{
    DEFAULT_EPOCH, DEFAULT_QUANTITY, NODAL_EPOCH, NODAL_PERIOD, TermConfig, TrendShape,
    U2_COLUMN, V2_COLUMN,
};
pub use design::DesignMatrix;
pub use error::TermError;
pub use term::{Term, TermColumn};
