//! Tunable constants of the snapshot pipeline.

use hedge_lp_domain::metrics::{CrossPositionPolicy, DEFAULT_QUALITY_EPSILON};
use serde::{Deserialize, Serialize};

/// Share of starting capital assumed to sit in the LP on the first snapshot.
pub const DEFAULT_INITIAL_LP_ALLOCATION: f64 = 0.5;
/// Hedge adjustments at or below this size are reported without a reason.
pub const DEFAULT_SUGGESTION_NOISE_FLOOR: f64 = 0.001;

/// Engine-wide parameters, shared by every strategy a pipeline serves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineParameters {
    /// LP PnL below this magnitude scores a perfect hedge.
    pub quality_epsilon: f64,
    pub cross_position: CrossPositionPolicy,
    /// Fraction of starting capital used as the LP cost basis on the first snapshot.
    pub initial_lp_allocation: f64,
    pub suggestion_noise_floor: f64,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            quality_epsilon: DEFAULT_QUALITY_EPSILON,
            cross_position: CrossPositionPolicy::default(),
            initial_lp_allocation: DEFAULT_INITIAL_LP_ALLOCATION,
            suggestion_noise_floor: DEFAULT_SUGGESTION_NOISE_FLOOR,
        }
    }
}

impl EngineParameters {
    #[must_use]
    pub fn with_quality_epsilon(mut self, epsilon: f64) -> Self {
        self.quality_epsilon = epsilon;
        self
    }

    #[must_use]
    pub fn with_cross_position(mut self, policy: CrossPositionPolicy) -> Self {
        self.cross_position = policy;
        self
    }

    #[must_use]
    pub fn with_initial_lp_allocation(mut self, fraction: f64) -> Self {
        self.initial_lp_allocation = fraction;
        self
    }
}
