//! Sampling resolution of a year axis.

/// Sampling resolution of a tide-gauge or forcing series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One value per calendar year; every stamp is a whole year.
    Annual,
    /// Sub-annual stamps (monthly means).
    Monthly,
}

/// Infers the resolution of a year axis.
///
/// The axis is [`Resolution::Annual`] when every value has a zero
/// fractional part (an empty axis counts as annual), otherwise
/// [`Resolution::Monthly`].
pub fn infer_resolution(years: &[f64]) -> Resolution {
    if years.iter().all(|y| y.fract() == 0.0) {
        Resolution::Annual
    } else {
        Resolution::Monthly
    }
}
