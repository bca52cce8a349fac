use serde::{Deserialize, Serialize};

/// Split of strategy capital between the LP leg and the hedge account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalAllocation {
    pub lp_pct: f64,
    pub hedge_pct: f64,
}

impl CapitalAllocation {
    /// Allocation of `lp_value_usd` and `account_equity_usd` as percentages
    /// of their sum. Both are zero when the sum is zero.
    pub fn from_values(lp_value_usd: f64, account_equity_usd: f64) -> Self {
        let total = lp_value_usd + account_equity_usd;
        if total == 0.0 {
            return Self {
                lp_pct: 0.0,
                hedge_pct: 0.0,
            };
        }
        Self {
            lp_pct: lp_value_usd / total * 100.0,
            hedge_pct: account_equity_usd / total * 100.0,
        }
    }
}

/// Percent change from `entry` to `current`; zero when `entry` is zero.
pub fn pct_change(current: f64, entry: f64) -> f64 {
    if entry == 0.0 {
        return 0.0;
    }
    (current - entry) / entry * 100.0
}
