//! Delta-drift trigger.

use super::{LegSignals, RebalanceTrigger, TriggerContext};

/// Returns true when the hedge is off target by more than `threshold_pct`
/// of the target size.
pub fn check_delta_drift_trigger(adjustment: f64, target: f64, threshold_pct: f64) -> bool {
    adjustment.abs() > target.abs() * threshold_pct
}

/// Fires per hedge leg when the leg has drifted from its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaDriftTrigger {
    /// Fraction, e.g. 0.10 for 10%.
    pub threshold_pct: f64,
}

impl DeltaDriftTrigger {
    #[must_use]
    pub fn new(threshold_pct: f64) -> Self {
        Self { threshold_pct }
    }
}

impl RebalanceTrigger for DeltaDriftTrigger {
    fn evaluate(&self, context: &TriggerContext) -> LegSignals {
        LegSignals {
            token1: check_delta_drift_trigger(
                context.adjustment1,
                context.targets.target_hedge1,
                self.threshold_pct,
            ),
            token2: check_delta_drift_trigger(
                context.adjustment2,
                context.targets.target_hedge2,
                self.threshold_pct,
            ),
        }
    }

    fn name(&self) -> &'static str {
        "Delta Drift"
    }
}
