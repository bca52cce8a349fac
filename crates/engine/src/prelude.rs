//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use hedge_lp_engine::prelude::*;
//! ```

pub use crate::hedge::{
    HedgeDelta, NetExposure, TargetHedges, calculate_adjustment, calculate_hedge_delta,
    calculate_target_hedge_positions, describe_position, net_exposure,
};
pub use crate::params::EngineParameters;
pub use crate::pipeline::{LiquidityEstimate, SnapshotPipeline, estimate_liquidity};
pub use crate::triggers::{
    CrossPositionTrigger, DeltaDriftTrigger, LegSignals, PriceMoveTrigger, RebalanceTrigger,
    TriggerContext, TriggerEngine, TriggerEvaluation, check_delta_drift_trigger,
    check_price_move_trigger, classify,
};

pub use hedge_lp_domain::entities::{HedgeLeg, Observation, Snapshot, StrategyConfig};
pub use hedge_lp_domain::enums::RebalanceReason;
pub use hedge_lp_domain::math::{LPState, compute_liquidity_from_notional, compute_lp_state};
pub use hedge_lp_domain::value_objects::SnapshotMetrics;
