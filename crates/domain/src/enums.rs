use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a rebalance was advised for a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RebalanceReason {
    #[default]
    None,
    PriceMove,
    DeltaDrift,
    Both,
    CrossPosition,
    /// Set by an operator override, never by the engine.
    Manual,
}

impl RebalanceReason {
    pub fn is_rebalance(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::PriceMove => "PRICE_MOVE",
            Self::DeltaDrift => "DELTA_DRIFT",
            Self::Both => "BOTH",
            Self::CrossPosition => "CROSS_POSITION",
            Self::Manual => "MANUAL",
        }
    }
}

impl fmt::Display for RebalanceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePosition {
    BelowRange,
    InRange,
    AboveRange,
}

/// Label attached to a per-leg hedge suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustmentReason {
    #[default]
    None,
    DeltaDrift,
}

impl fmt::Display for AdjustmentReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::DeltaDrift => f.write_str("Delta drift"),
        }
    }
}
