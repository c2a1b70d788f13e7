//! Storm-surge estimates and their removal from a gauge series.

use std::collections::BTreeMap;

use slr_calendar::Resolution;
use slr_series::Observations;
use slr_stats::{fill_with_mean, nanmean};
use tracing::{debug, info};

use crate::error::ForcingError;
use crate::join::{JoinKey, join_keys, left_join};

const SURGE: &str = "surge";
const MM_PER_M: f64 = 1000.0;

/// Modelled surge in millimetres on a year axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SurgeSeries {
    obs: Observations,
}

impl SurgeSeries {
    /// Creates a surge series from values in metres.
    ///
    /// # Errors
    ///
    /// [`ForcingError::Series`] for an invalid year axis or length.
    pub fn new(years: Vec<f64>, surge_m: Vec<f64>) -> Result<Self, ForcingError> {
        let mm = surge_m.into_iter().map(|s| s * MM_PER_M).collect();
        let obs = Observations::new(years)?.with_column(SURGE, mm)?;
        Ok(Self { obs })
    }

    pub fn years(&self) -> &[f64] {
        self.obs.years()
    }

    /// Surge in millimetres.
    pub fn surge_mm(&self) -> &[f64] {
        self.obs.get(SURGE).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.obs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    fn keyed(&self, resolution: Resolution) -> Result<(Vec<JoinKey>, Vec<f64>), ForcingError> {
        if resolution == Resolution::Monthly && self.obs.resolution() == Resolution::Annual {
            return Err(ForcingError::ResolutionMismatch { what: "surge" });
        }
        let keys = join_keys(&self.obs, resolution)?;
        if resolution == Resolution::Monthly || self.obs.resolution() == Resolution::Annual {
            return Ok((keys, self.surge_mm().to_vec()));
        }
        // monthly surge against annual observations: calendar-year means
        let mut groups: BTreeMap<JoinKey, Vec<f64>> = BTreeMap::new();
        for (k, s) in keys.into_iter().zip(self.surge_mm()) {
            groups.entry(k).or_default().push(*s);
        }
        let values = groups
            .values()
            .map(|g| nanmean(g).unwrap_or(f64::NAN))
            .collect();
        Ok((groups.into_keys().collect(), values))
    }
}

/// Adds surge-corrected versions of `quantity` to `obs`.
///
/// New columns: `surge` (mm, unmatched rows filled with the mean),
/// `<quantity> - surge` and `<quantity> - surge anomaly`, the latter removing
/// only the deviation of the surge from its mean.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ForcingError::Series`] | `quantity` is not a column of `obs` |
/// | [`ForcingError::ResolutionMismatch`] | `obs` is monthly and `surge` annual |
pub fn attach_surge(
    obs: &Observations,
    surge: &SurgeSeries,
    quantity: &str,
) -> Result<Observations, ForcingError> {
    let q = obs.column(quantity)?;
    let resolution = obs.resolution();
    let target = join_keys(obs, resolution)?;
    let (source, values) = surge.keyed(resolution)?;
    let (joined, unmatched) = left_join(&target, &source, &values);
    if unmatched > 0 {
        info!(unmatched, rows = obs.len(), "observations without surge, filled with mean");
    }

    let filled = fill_with_mean(&joined);
    let mean = nanmean(&filled).unwrap_or(0.0);
    let corrected: Vec<f64> = q.iter().zip(&filled).map(|(h, s)| h - s).collect();
    let anomaly: Vec<f64> = q.iter().zip(&filled).map(|(h, s)| h - (s - mean)).collect();
    debug!(quantity, mean_surge = mean, "surge attached");

    let mut out = obs.clone();
    out.set_column(SURGE, filled)?;
    out.set_column(format!("{quantity} - surge"), corrected)?;
    out.set_column(format!("{quantity} - surge anomaly"), anomaly)?;
    Ok(out)
}
