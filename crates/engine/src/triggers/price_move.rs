//! Price-move trigger.

use super::{LegSignals, RebalanceTrigger, TriggerContext};

/// Returns true when `current` moved more than `threshold_pct` (a fraction)
/// away from `previous`.
///
/// A missing or non-positive previous price never fires.
pub fn check_price_move_trigger(current: f64, previous: f64, threshold_pct: f64) -> bool {
    if !(previous > 0.0) {
        return false;
    }
    (current - previous).abs() / previous > threshold_pct
}

/// Fires per token when its USD price moved past the threshold since the
/// previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceMoveTrigger {
    /// Fraction, e.g. 0.02 for 2%.
    pub threshold_pct: f64,
}

impl PriceMoveTrigger {
    #[must_use]
    pub fn new(threshold_pct: f64) -> Self {
        Self { threshold_pct }
    }
}

impl RebalanceTrigger for PriceMoveTrigger {
    fn evaluate(&self, context: &TriggerContext) -> LegSignals {
        LegSignals {
            token1: check_price_move_trigger(
                context.token1_price,
                context.previous_token1_price,
                self.threshold_pct,
            ),
            token2: check_price_move_trigger(
                context.token2_price,
                context.previous_token2_price,
                self.threshold_pct,
            ),
        }
    }

    fn name(&self) -> &'static str {
        "Price Move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_above_threshold_in_either_direction() {
        assert!(check_price_move_trigger(2050.0, 2000.0, 0.02));
        assert!(check_price_move_trigger(1950.0, 2000.0, 0.02));
        assert!(!check_price_move_trigger(2030.0, 2000.0, 0.02));
    }

    #[test]
    fn test_threshold_is_strict() {
        // Exactly 25% is not above a 25% threshold.
        assert!(!check_price_move_trigger(125.0, 100.0, 0.25));
    }

    #[test]
    fn test_non_positive_previous_never_fires() {
        assert!(!check_price_move_trigger(100.0, 0.0, 0.01));
        assert!(!check_price_move_trigger(100.0, -5.0, 0.01));
        assert!(!check_price_move_trigger(100.0, f64::NAN, 0.01));
    }

    #[test]
    fn test_name() {
        assert_eq!(PriceMoveTrigger::new(0.02).name(), "Price Move");
    }
}
