//! Hedge sizing from LP exposure.
//!
//! Each token is hedged by its own perpetual: the token1 leg offsets the
//! LP's token1 delta and the token2 leg offsets the LP's token2 inventory.
//! There is no netting across tokens.

use hedge_lp_domain::enums::AdjustmentReason;
use hedge_lp_domain::math::LPState;
use hedge_lp_domain::value_objects::LegSuggestion;
use serde::{Deserialize, Serialize};

/// Hedge sizes that neutralize an LP state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetHedges {
    /// Signed token1 perp size, `-delta`.
    pub target_hedge1: f64,
    /// Signed token2 perp size, `-y`.
    pub target_hedge2: f64,
}

/// Signed sizes of both hedge legs and their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeDelta {
    pub hedge1_delta: f64,
    pub hedge2_delta: f64,
    pub total_delta: f64,
}

/// Per-token exposure left after the hedges are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetExposure {
    pub token1: f64,
    pub token2: f64,
}

/// Calculates the target hedge positions for an LP state.
///
/// # Arguments
///
/// * `lp_state` - LP state at the current reference price
///
/// # Returns
///
/// Short token1 by the LP delta and short token2 by the LP token2 amount.
pub fn calculate_target_hedge_positions(lp_state: &LPState) -> TargetHedges {
    TargetHedges {
        target_hedge1: -lp_state.delta,
        target_hedge2: -lp_state.y,
    }
}

/// Order size that moves `current` to `target`: positive buys, negative sells.
pub fn calculate_adjustment(target: f64, current: f64) -> f64 {
    target - current
}

/// Aggregates two signed hedge sizes.
pub fn calculate_hedge_delta(hedge1_size: f64, hedge2_size: f64) -> HedgeDelta {
    HedgeDelta {
        hedge1_delta: hedge1_size,
        hedge2_delta: hedge2_size,
        total_delta: hedge1_size + hedge2_size,
    }
}

/// Residual exposure per token once the hedge legs are added to the LP.
pub fn net_exposure(lp_state: &LPState, hedge1_size: f64, hedge2_size: f64) -> NetExposure {
    NetExposure {
        token1: lp_state.delta + hedge1_size,
        token2: lp_state.y + hedge2_size,
    }
}

/// Builds the suggestion for one leg.
///
/// Adjustments whose magnitude does not exceed `noise_floor` are labelled
/// [`AdjustmentReason::None`].
pub fn leg_suggestion(current: f64, target: f64, noise_floor: f64) -> LegSuggestion {
    let adjustment = calculate_adjustment(target, current);
    let reason = if adjustment.abs() > noise_floor {
        AdjustmentReason::DeltaDrift
    } else {
        AdjustmentReason::None
    };

    LegSuggestion {
        current,
        target,
        adjustment,
        reason,
    }
}

/// Human-readable position, e.g. `Short 1.500 ETH`.
pub fn describe_position(size: f64, symbol: &str) -> String {
    if size == 0.0 {
        format!("0 {symbol}")
    } else if size < 0.0 {
        format!("Short {:.3} {symbol}", size.abs())
    } else {
        format!("Long {size:.3} {symbol}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedge_lp_domain::enums::RangePosition;

    fn state(x: f64, y: f64) -> LPState {
        LPState {
            x,
            y,
            value: x * 2000.0 + y,
            delta: x,
            position: RangePosition::InRange,
        }
    }

    #[test]
    fn test_targets_short_each_token() {
        let targets = calculate_target_hedge_positions(&state(1.25, 2600.0));
        assert_eq!(targets.target_hedge1, -1.25);
        assert_eq!(targets.target_hedge2, -2600.0);
    }

    #[test]
    fn test_adjustment_sign() {
        // Need to sell 0.25 more
        assert_eq!(calculate_adjustment(-1.25, -1.0), -0.25);
        // Over-hedged, buy back
        assert_eq!(calculate_adjustment(-1.0, -1.5), 0.5);
    }

    #[test]
    fn test_hedge_delta_and_net_exposure() {
        let delta = calculate_hedge_delta(-1.0, -2500.0);
        assert_eq!(delta.total_delta, -2501.0);

        let net = net_exposure(&state(1.25, 2600.0), -1.0, -2500.0);
        assert_eq!(net.token1, 0.25);
        assert_eq!(net.token2, 100.0);
    }

    #[test]
    fn test_leg_suggestion_noise_floor() {
        let quiet = leg_suggestion(-1.0, -1.0005, 0.001);
        assert_eq!(quiet.reason, AdjustmentReason::None);

        let drift = leg_suggestion(-1.0, -1.2, 0.001);
        assert_eq!(drift.reason, AdjustmentReason::DeltaDrift);
        assert!((drift.adjustment + 0.2).abs() < 1e-12);
        assert_eq!(drift.reason.to_string(), "Delta drift");
    }

    #[test]
    fn test_describe_position() {
        assert_eq!(describe_position(-1.5, "ETH"), "Short 1.500 ETH");
        assert_eq!(describe_position(2.0, "SOL"), "Long 2.000 SOL");
        assert_eq!(describe_position(0.0, "USDC"), "0 USDC");
    }
}
