use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A fraction such as `0.02` for 2%.
///
/// Thresholds are entered by operators and stored exactly; conversion to
/// `f64` happens only where they meet the floating-point math.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn new(fraction: Decimal) -> Self {
        Self(fraction)
    }

    /// The fraction as `f64` (0.02 for 2%).
    pub fn as_fraction(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// The fraction expressed in percentage points (2.0 for 2%).
    pub fn as_points(&self) -> f64 {
        self.as_fraction() * 100.0
    }

    pub fn is_fraction(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::ONE
    }
}
