//! Rebalance triggers.
//!
//! Three independent signals are evaluated against the previous snapshot:
//! a price move on either token, a delta drift on either hedge leg, and a
//! low liquidation buffer (the cross-position signal). They collapse into
//! a single [`RebalanceReason`] with a fixed precedence: the cross-position
//! signal overrides everything, otherwise price and drift combine into
//! `BOTH`.

pub mod cross_position;
pub mod delta_drift;
pub mod price_move;

pub use cross_position::CrossPositionTrigger;
pub use delta_drift::{DeltaDriftTrigger, check_delta_drift_trigger};
pub use price_move::{PriceMoveTrigger, check_price_move_trigger};

use crate::hedge::TargetHedges;
use crate::params::EngineParameters;
use hedge_lp_domain::entities::StrategyConfig;
use hedge_lp_domain::enums::RebalanceReason;
use hedge_lp_domain::metrics::CrossPositionSuggestion;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs every trigger reads. Only built when a previous snapshot exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerContext {
    pub token1_price: f64,
    pub token2_price: f64,
    pub previous_token1_price: f64,
    pub previous_token2_price: f64,
    pub targets: TargetHedges,
    /// `target - current` for the token1 leg.
    pub adjustment1: f64,
    /// `target - current` for the token2 leg.
    pub adjustment2: f64,
    pub lp_value_usd: f64,
    pub account_equity_usd: f64,
    pub liquidation_buffer_pct: Option<f64>,
}

/// Whether a signal fired for each leg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSignals {
    pub token1: bool,
    pub token2: bool,
}

impl LegSignals {
    pub fn any(&self) -> bool {
        self.token1 || self.token2
    }
}

/// A per-leg rebalance signal.
pub trait RebalanceTrigger {
    /// Evaluates the signal for both legs.
    fn evaluate(&self, context: &TriggerContext) -> LegSignals;

    /// Returns the trigger name for logging.
    fn name(&self) -> &'static str;
}

/// Outcome of running every trigger on one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvaluation {
    pub price_move: LegSignals,
    pub delta_drift: LegSignals,
    /// Present only when the cross-position signal fired.
    pub cross_position: Option<CrossPositionSuggestion>,
    pub reason: RebalanceReason,
}

impl TriggerEvaluation {
    /// Nothing fired. Used for the first snapshot of a strategy.
    pub fn quiet() -> Self {
        Self::default()
    }
}

/// Collapses the three signal families into one reason.
pub fn classify(price_move: bool, delta_drift: bool, cross_position: bool) -> RebalanceReason {
    if cross_position {
        return RebalanceReason::CrossPosition;
    }
    match (price_move, delta_drift) {
        (true, true) => RebalanceReason::Both,
        (true, false) => RebalanceReason::PriceMove,
        (false, true) => RebalanceReason::DeltaDrift,
        (false, false) => RebalanceReason::None,
    }
}

/// Runs the configured triggers of one strategy.
#[derive(Debug, Clone)]
pub struct TriggerEngine {
    pub price_move: PriceMoveTrigger,
    pub delta_drift: DeltaDriftTrigger,
    pub cross_position: CrossPositionTrigger,
}

impl TriggerEngine {
    /// Builds the triggers from a strategy's thresholds.
    #[must_use]
    pub fn from_config(config: &StrategyConfig, params: &EngineParameters) -> Self {
        Self {
            price_move: PriceMoveTrigger::new(config.price_move_threshold.as_fraction()),
            delta_drift: DeltaDriftTrigger::new(config.delta_drift_threshold.as_fraction()),
            cross_position: CrossPositionTrigger::new(
                config.cross_position_threshold.as_fraction(),
                params.cross_position,
            ),
        }
    }

    /// Evaluates all triggers and classifies the result.
    pub fn evaluate(&self, context: &TriggerContext) -> TriggerEvaluation {
        let price_move = self.price_move.evaluate(context);
        let delta_drift = self.delta_drift.evaluate(context);
        let cross_position = self.cross_position.evaluate(context);

        let reason = classify(price_move.any(), delta_drift.any(), cross_position.is_some());
        debug!(
            trigger = self.price_move.name(),
            token1 = price_move.token1,
            token2 = price_move.token2,
            "Evaluated trigger"
        );
        debug!(
            trigger = self.delta_drift.name(),
            token1 = delta_drift.token1,
            token2 = delta_drift.token2,
            "Evaluated trigger"
        );
        debug!(
            cross_position = cross_position.is_some(),
            %reason,
            "Classified rebalance triggers"
        );

        TriggerEvaluation {
            price_move,
            delta_drift,
            cross_position,
            reason,
        }
    }
}
