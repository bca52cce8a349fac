use crate::enums::RangePosition;
use serde::{Deserialize, Serialize};

/// Price bounds `[lower, upper]` of a concentrated-liquidity position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub lower: f64,
    pub upper: f64,
}

impl PriceRange {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `0 < lower < upper`.
    pub fn is_valid(&self) -> bool {
        self.lower > 0.0 && self.lower < self.upper
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Clamps `price` into the range. Unlike `f64::clamp` this never panics
    /// on inverted or NaN bounds.
    pub fn clamp(&self, price: f64) -> f64 {
        self.lower.max(self.upper.min(price))
    }

    /// Region of `price` relative to the bounds. Both bounds count as in range.
    pub fn position_of(&self, price: f64) -> RangePosition {
        if price < self.lower {
            RangePosition::BelowRange
        } else if price > self.upper {
            RangePosition::AboveRange
        } else {
            RangePosition::InRange
        }
    }
}
