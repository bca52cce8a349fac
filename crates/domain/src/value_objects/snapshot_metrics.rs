use crate::enums::{AdjustmentReason, RebalanceReason};
use crate::math::LPState;
use crate::metrics::{
    CapitalAllocation, CrossPositionSuggestion, HedgeQualityGrade, LiquidationRisk,
};
use serde::{Deserialize, Serialize};

/// Suggested change to one hedge leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSuggestion {
    pub current: f64,
    pub target: f64,
    /// `target - current`: positive buys, negative sells.
    pub adjustment: f64,
    pub reason: AdjustmentReason,
}

/// Per-token hedge suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeRebalanceSuggestion {
    pub token1: LegSuggestion,
    pub token2: LegSuggestion,
}

/// Growth of the cumulative fee and funding counters since the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowIncrements {
    pub lp_token1_fees: f64,
    pub lp_token2_fees: f64,
    pub hedge1_funding_usd: f64,
    pub hedge2_funding_usd: f64,
}

/// Everything the engine derives for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetrics {
    pub lp_value_usd: f64,
    pub lp_pnl_usd: f64,
    pub hedge1_pnl_usd: f64,
    pub hedge2_pnl_usd: f64,
    pub total_hedge_pnl_usd: f64,
    pub margin_used_usd: f64,
    pub funding_paid_usd: f64,
    pub lp_fees_usd: f64,
    pub total_strategy_value_usd: f64,
    pub total_strategy_pnl_usd: f64,
    pub total_strategy_pnl_pct: f64,

    /// Reference price the LP state was evaluated at.
    pub lp_price: f64,
    pub estimated_liquidity: f64,
    pub used_liquidity_fallback: bool,
    pub lp_state: LPState,
    /// LP token1 exposure plus hedge1 size.
    pub net_token1_exposure: f64,
    /// LP token2 amount plus hedge2 size.
    pub net_token2_exposure: f64,

    pub hedge_quality_score: f64,
    pub hedge_quality_grade: HedgeQualityGrade,
    pub liquidation_buffer_pct: Option<f64>,
    pub liquidation_risk: Option<LiquidationRisk>,
    pub capital_allocation: CapitalAllocation,

    pub hedge_rebalance_suggestion: HedgeRebalanceSuggestion,
    pub cross_position_suggestion: Option<CrossPositionSuggestion>,
    pub rebalance_reason: RebalanceReason,
    /// Present when a previous snapshot exists.
    pub increments: Option<FlowIncrements>,
}
