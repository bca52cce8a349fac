//! Cross-position trigger: a low liquidation buffer calls for moving
//! capital from the LP to hedge margin.

use super::TriggerContext;
use hedge_lp_domain::metrics::{CrossPositionPolicy, CrossPositionSuggestion};

/// Wraps [`CrossPositionPolicy`] with a strategy's buffer threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossPositionTrigger {
    /// Fraction, e.g. 0.20 fires below a 20% buffer.
    pub threshold_pct: f64,
    pub policy: CrossPositionPolicy,
}

impl CrossPositionTrigger {
    #[must_use]
    pub fn new(threshold_pct: f64, policy: CrossPositionPolicy) -> Self {
        Self {
            threshold_pct,
            policy,
        }
    }

    /// Returns the suggestion when the trigger fires.
    pub fn evaluate(&self, context: &TriggerContext) -> Option<CrossPositionSuggestion> {
        let suggestion = self.policy.evaluate(
            context.lp_value_usd,
            context.account_equity_usd,
            context.liquidation_buffer_pct,
            self.threshold_pct,
        );
        suggestion.should_rebalance.then_some(suggestion)
    }
}
