//! Term-set configuration.

/// Reference year of the linear and quadratic trend terms.
pub const DEFAULT_EPOCH: i32 = 1970;

/// Phase anchor of the nodal cycle, independent of the trend epoch.
pub const NODAL_EPOCH: f64 = 1970.0;

/// Period of the lunar nodal cycle in years.
pub const NODAL_PERIOD: f64 = 18.613;

/// Response column used when none is configured.
pub const DEFAULT_QUANTITY: &str = "height";

/// Column holding the signed squared zonal wind.
pub const U2_COLUMN: &str = "u2";

/// Column holding the signed squared meridional wind.
pub const V2_COLUMN: &str = "v2";

/// Shape of the long-term trend part of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendShape {
    /// `Trend = year - epoch`.
    Linear { epoch: i32 },
    /// Linear plus `Acceleration = (year - epoch)²`.
    Quadratic { epoch: i32 },
    /// Linear plus `+trend (break) = (year > break)·(year - break)`.
    BrokenLinear { epoch: i32, break_year: i32 },
    /// Trend and acceleration measured from `start_acceleration`; the
    /// acceleration column is zero before it.
    BrokenQuadratic { start_acceleration: i32 },
}

impl TrendShape {
    /// Year at which the trend term is zero.
    pub fn epoch(&self) -> i32 {
        match *self {
            TrendShape::Linear { epoch }
            | TrendShape::Quadratic { epoch }
            | TrendShape::BrokenLinear { epoch, .. } => epoch,
            TrendShape::BrokenQuadratic { start_acceleration } => start_acceleration,
        }
    }

    /// Label of the constant term.
    ///
    /// Quadratic shapes carry the epoch since the intercept of a parabola
    /// depends on where it is centred.
    pub fn constant_label(&self) -> String {
        match self {
            TrendShape::Linear { .. } | TrendShape::BrokenLinear { .. } => "Constant".to_string(),
            TrendShape::Quadratic { .. } | TrendShape::BrokenQuadratic { .. } => {
                format!("Constant (in year {})", self.epoch())
            }
        }
    }
}

/// Which terms enter a design matrix and which column is the response.
#[derive(Debug, Clone, PartialEq)]
pub struct TermConfig {
    trend: TrendShape,
    with_nodal: bool,
    with_wind: bool,
    quantity: String,
}

impl TermConfig {
    /// Creates a configuration with nodal and wind terms enabled and
    /// `height` as response.
    pub fn new(trend: TrendShape) -> Self {
        Self {
            trend,
            with_nodal: true,
            with_wind: true,
            quantity: DEFAULT_QUANTITY.to_string(),
        }
    }

    pub fn with_nodal(mut self, with_nodal: bool) -> Self {
        self.with_nodal = with_nodal;
        self
    }

    pub fn with_wind(mut self, with_wind: bool) -> Self {
        self.with_wind = with_wind;
        self
    }

    /// Sets the response column.
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    pub fn trend(&self) -> TrendShape {
        self.trend
    }

    pub fn nodal(&self) -> bool {
        self.with_nodal
    }

    pub fn wind(&self) -> bool {
        self.with_wind
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }
}
