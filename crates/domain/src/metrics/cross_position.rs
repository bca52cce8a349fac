use super::allocation::CapitalAllocation;
use serde::{Deserialize, Serialize};

/// Points added to the threshold to get the buffer a rebalance aims for.
pub const TARGET_BUFFER_MARGIN_PTS: f64 = 10.0;
/// Largest share of the LP value a single suggestion may move.
pub const MAX_LP_DRAIN_FRACTION: f64 = 0.3;

/// Advisory suggestion to move capital from the LP leg to hedge margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPositionSuggestion {
    pub should_rebalance: bool,
    pub reason: String,
    pub suggested_lp_allocation_pct: f64,
    pub suggested_hedge_allocation_pct: f64,
    /// USD to move from the LP leg to the hedge account.
    pub capital_to_move: f64,
    /// Zero when no liquidation price is configured.
    pub current_liquidation_buffer_pct: f64,
    /// Buffer the move aims for, when triggered.
    pub target_buffer_pct: Option<f64>,
    /// `target_buffer_pct - current buffer`, when triggered.
    pub buffer_deficit_pct: Option<f64>,
}

/// Tunables of the cross-position rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossPositionPolicy {
    pub target_margin_pts: f64,
    pub max_lp_drain_fraction: f64,
}

impl Default for CrossPositionPolicy {
    fn default() -> Self {
        Self {
            target_margin_pts: TARGET_BUFFER_MARGIN_PTS,
            max_lp_drain_fraction: MAX_LP_DRAIN_FRACTION,
        }
    }
}

impl CrossPositionPolicy {
    /// Evaluates the rule for one snapshot.
    ///
    /// Fires only when the buffer is known and below `threshold_pct * 100`.
    /// The move closes the gap to `threshold_pct * 100 + target_margin_pts`,
    /// sized as `equity * deficit / 100` and capped at
    /// `lp_value * max_lp_drain_fraction`.
    pub fn evaluate(
        &self,
        lp_value_usd: f64,
        account_equity_usd: f64,
        liquidation_buffer_pct: Option<f64>,
        threshold_pct: f64,
    ) -> CrossPositionSuggestion {
        let total_value = lp_value_usd + account_equity_usd;
        let current = CapitalAllocation::from_values(lp_value_usd, account_equity_usd);

        let mut suggestion = CrossPositionSuggestion {
            should_rebalance: false,
            reason: String::new(),
            suggested_lp_allocation_pct: current.lp_pct,
            suggested_hedge_allocation_pct: current.hedge_pct,
            capital_to_move: 0.0,
            current_liquidation_buffer_pct: liquidation_buffer_pct.unwrap_or(0.0),
            target_buffer_pct: None,
            buffer_deficit_pct: None,
        };

        let Some(buffer) = liquidation_buffer_pct else {
            return suggestion;
        };
        let threshold_points = threshold_pct * 100.0;
        if !(buffer < threshold_points) {
            return suggestion;
        }

        let target_buffer = threshold_points + self.target_margin_pts;
        let deficit = target_buffer - buffer;
        let capital_needed = account_equity_usd * (deficit / 100.0);
        let capital_to_move = capital_needed.min(lp_value_usd * self.max_lp_drain_fraction);

        suggestion.should_rebalance = true;
        suggestion.reason = format!(
            "Liquidation buffer low ({buffer:.2}%). Move capital from LP to hedge to increase margin."
        );
        suggestion.capital_to_move = capital_to_move;
        suggestion.target_buffer_pct = Some(target_buffer);
        suggestion.buffer_deficit_pct = Some(deficit);
        if total_value != 0.0 {
            suggestion.suggested_hedge_allocation_pct =
                (account_equity_usd + capital_to_move) / total_value * 100.0;
            suggestion.suggested_lp_allocation_pct =
                (lp_value_usd - capital_to_move) / total_value * 100.0;
        }
        suggestion
    }
}

/// [`CrossPositionPolicy::evaluate`] with the default policy.
pub fn calculate_cross_position_rebalance(
    lp_value_usd: f64,
    account_equity_usd: f64,
    liquidation_buffer_pct: Option<f64>,
    threshold_pct: f64,
) -> CrossPositionSuggestion {
    CrossPositionPolicy::default().evaluate(
        lp_value_usd,
        account_equity_usd,
        liquidation_buffer_pct,
        threshold_pct,
    )
}
