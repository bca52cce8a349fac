//! Hedge quality and risk metrics.

pub mod allocation;
pub mod cross_position;
pub mod hedge_quality;
pub mod liquidation;

pub use allocation::{CapitalAllocation, pct_change};
pub use cross_position::{
    CrossPositionPolicy, CrossPositionSuggestion, calculate_cross_position_rebalance,
};
pub use hedge_quality::{DEFAULT_QUALITY_EPSILON, HedgeQualityGrade, calculate_hedge_quality_score};
pub use liquidation::{LiquidationRisk, calculate_liquidation_buffer, leg_liquidation_buffer};
