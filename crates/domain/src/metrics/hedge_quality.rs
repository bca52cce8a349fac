use serde::{Deserialize, Serialize};

/// LP moves smaller than this (in USD) are too small to judge a hedge on.
pub const DEFAULT_QUALITY_EPSILON: f64 = 1.0;

/// Scores how completely the hedge legs offset the LP's PnL.
///
/// `net = lp + hedge1 + hedge2 - funding`. Returns 1.0 when `|lp| < epsilon`,
/// otherwise `1 - min(1, |net| / |lp|)`: 1.0 is a perfect offset, 0.0 none.
pub fn calculate_hedge_quality_score(
    lp_pnl_usd: f64,
    hedge1_pnl_usd: f64,
    hedge2_pnl_usd: f64,
    funding_paid_usd: f64,
    epsilon: f64,
) -> f64 {
    let net_pnl_usd = lp_pnl_usd + hedge1_pnl_usd + hedge2_pnl_usd - funding_paid_usd;
    let abs_lp_move = lp_pnl_usd.abs();

    if abs_lp_move < epsilon {
        return 1.0;
    }

    1.0 - (net_pnl_usd.abs() / abs_lp_move).min(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HedgeQualityGrade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HedgeQualityGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::Excellent
        } else if score >= 0.6 {
            Self::Good
        } else if score >= 0.4 {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}
