//! Snapshot pipeline.
//!
//! Turns a strategy configuration, a raw observation and the previous
//! snapshot (if any) into the full set of derived metrics. The pipeline is
//! pure: it never stores anything and never fails. Liquidity inversion
//! errors are answered with the algebraic fallback estimate.

use crate::hedge::{calculate_target_hedge_positions, leg_suggestion, net_exposure};
use crate::params::EngineParameters;
use crate::triggers::{TriggerContext, TriggerEngine, TriggerEvaluation};
use hedge_lp_domain::entities::{Observation, Snapshot, StrategyConfig};
use hedge_lp_domain::math::{
    compute_liquidity_from_notional, compute_lp_state, estimate_liquidity_fallback,
};
use hedge_lp_domain::metrics::{
    CapitalAllocation, HedgeQualityGrade, LiquidationRisk, calculate_hedge_quality_score,
    calculate_liquidation_buffer,
};
use hedge_lp_domain::value_objects::{
    FlowIncrements, HedgeRebalanceSuggestion, PriceRange, SnapshotMetrics,
};
use tracing::{debug, warn};

/// Liquidity constant used to model the LP, and how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityEstimate {
    pub liquidity: f64,
    pub used_fallback: bool,
}

/// Estimates the liquidity constant of an LP worth `lp_value_usd` at `reference_price`.
///
/// The exact inversion runs at the reference price when it lies inside the
/// range and at the range midpoint otherwise. If the inversion fails the
/// fallback estimator is used instead.
pub fn estimate_liquidity(lp_value_usd: f64, reference_price: f64, range: &PriceRange) -> LiquidityEstimate {
    let price_for_liquidity = if range.clamp(reference_price) == reference_price {
        reference_price
    } else {
        range.midpoint()
    };

    match compute_liquidity_from_notional(lp_value_usd, price_for_liquidity, range.lower, range.upper) {
        Ok(liquidity) => LiquidityEstimate {
            liquidity,
            used_fallback: false,
        },
        Err(e) => {
            let liquidity =
                estimate_liquidity_fallback(lp_value_usd, reference_price, range.lower, range.upper);
            warn!(error = %e, liquidity, "Liquidity inversion failed, using fallback estimate");
            LiquidityEstimate {
                liquidity,
                used_fallback: true,
            }
        }
    }
}

/// Computes derived snapshot metrics.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPipeline {
    params: EngineParameters,
}

impl SnapshotPipeline {
    /// Creates a pipeline with the given parameters.
    #[must_use]
    pub fn new(params: EngineParameters) -> Self {
        Self { params }
    }

    /// Derives every metric for one observation.
    ///
    /// # Arguments
    ///
    /// * `config` - Strategy the observation belongs to
    /// * `observation` - Raw prices, LP holdings, hedges and equity
    /// * `previous` - Snapshot immediately preceding this one in time, if any
    ///
    /// Non-finite inputs are not rejected here; they propagate into the
    /// affected outputs.
    pub fn compute(
        &self,
        config: &StrategyConfig,
        observation: &Observation,
        previous: Option<&Snapshot>,
    ) -> SnapshotMetrics {
        let obs = observation;
        let hedge1 = &obs.hedge1;
        let hedge2 = &obs.hedge2;

        let lp_value_usd =
            obs.lp_token1_amount * obs.token1_price + obs.lp_token2_amount * obs.token2_price;
        let lp_pnl_usd = match previous {
            Some(prev) => lp_value_usd - prev.metrics.lp_value_usd,
            None => lp_value_usd - config.starting_capital_usd * self.params.initial_lp_allocation,
        };

        let hedge1_pnl_usd = hedge1.pnl_at(obs.token1_price);
        let hedge2_pnl_usd = hedge2.pnl_at(obs.token2_price);
        let total_hedge_pnl_usd = hedge1_pnl_usd + hedge2_pnl_usd;

        let margin_used_usd = hedge1.margin_usd + hedge2.margin_usd;
        let funding_paid_usd = hedge1.funding_paid_usd + hedge2.funding_paid_usd;
        let lp_fees_usd = obs.lp_token1_fees_earned * obs.token1_price
            + obs.lp_token2_fees_earned * obs.token2_price;

        let total_strategy_value_usd = lp_value_usd + obs.account_equity_usd;
        let total_strategy_pnl_usd = lp_pnl_usd + total_hedge_pnl_usd - funding_paid_usd;
        let total_strategy_pnl_pct = total_strategy_pnl_usd / config.starting_capital_usd * 100.0;

        let lp_price = obs.reference_price();
        let estimate = estimate_liquidity(lp_value_usd, lp_price, &config.range);
        let lp_state =
            compute_lp_state(lp_price, estimate.liquidity, config.range.lower, config.range.upper);

        let targets = calculate_target_hedge_positions(&lp_state);
        let noise_floor = self.params.suggestion_noise_floor;
        let hedge_rebalance_suggestion = HedgeRebalanceSuggestion {
            token1: leg_suggestion(hedge1.size, targets.target_hedge1, noise_floor),
            token2: leg_suggestion(hedge2.size, targets.target_hedge2, noise_floor),
        };
        let net = net_exposure(&lp_state, hedge1.size, hedge2.size);

        let hedge_quality_score = calculate_hedge_quality_score(
            lp_pnl_usd,
            hedge1_pnl_usd,
            hedge2_pnl_usd,
            funding_paid_usd,
            self.params.quality_epsilon,
        );
        let liquidation_buffer_pct = calculate_liquidation_buffer(
            obs.token1_price,
            obs.token2_price,
            hedge1.liquidation_price,
            hedge2.liquidation_price,
            hedge1.size,
            hedge2.size,
        );

        let evaluation = match previous {
            Some(prev) => {
                let context = TriggerContext {
                    token1_price: obs.token1_price,
                    token2_price: obs.token2_price,
                    previous_token1_price: prev.observation.token1_price,
                    previous_token2_price: prev.observation.token2_price,
                    targets,
                    adjustment1: hedge_rebalance_suggestion.token1.adjustment,
                    adjustment2: hedge_rebalance_suggestion.token2.adjustment,
                    lp_value_usd,
                    account_equity_usd: obs.account_equity_usd,
                    liquidation_buffer_pct,
                };
                TriggerEngine::from_config(config, &self.params).evaluate(&context)
            }
            None => {
                debug!(strategy_id = %config.id, "First snapshot, triggers skipped");
                TriggerEvaluation::quiet()
            }
        };

        let increments = previous.map(|prev| flow_increments(obs, &prev.observation));

        SnapshotMetrics {
            lp_value_usd,
            lp_pnl_usd,
            hedge1_pnl_usd,
            hedge2_pnl_usd,
            total_hedge_pnl_usd,
            margin_used_usd,
            funding_paid_usd,
            lp_fees_usd,
            total_strategy_value_usd,
            total_strategy_pnl_usd,
            total_strategy_pnl_pct,
            lp_price,
            estimated_liquidity: estimate.liquidity,
            used_liquidity_fallback: estimate.used_fallback,
            lp_state,
            net_token1_exposure: net.token1,
            net_token2_exposure: net.token2,
            hedge_quality_score,
            hedge_quality_grade: HedgeQualityGrade::from_score(hedge_quality_score),
            liquidation_buffer_pct,
            liquidation_risk: liquidation_buffer_pct.map(LiquidationRisk::from_buffer),
            capital_allocation: CapitalAllocation::from_values(lp_value_usd, obs.account_equity_usd),
            hedge_rebalance_suggestion,
            cross_position_suggestion: evaluation.cross_position,
            rebalance_reason: evaluation.reason,
            increments,
        }
    }
}

fn flow_increments(current: &Observation, previous: &Observation) -> FlowIncrements {
    FlowIncrements {
        lp_token1_fees: current.lp_token1_fees_earned - previous.lp_token1_fees_earned,
        lp_token2_fees: current.lp_token2_fees_earned - previous.lp_token2_fees_earned,
        hedge1_funding_usd: current.hedge1.funding_paid_usd - previous.hedge1.funding_paid_usd,
        hedge2_funding_usd: current.hedge2.funding_paid_usd - previous.hedge2.funding_paid_usd,
    }
}
