use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// One perpetual-futures hedge leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HedgeLeg {
    /// Signed size in token units; negative is short.
    pub size: f64,
    pub entry_price: f64,
    pub leverage: f64,
    pub margin_usd: f64,
    /// Cumulative funding paid.
    #[serde(default)]
    pub funding_paid_usd: f64,
    #[serde(default)]
    pub liquidation_price: Option<f64>,
}

impl HedgeLeg {
    pub fn new(size: f64, entry_price: f64, leverage: f64, margin_usd: f64) -> Self {
        Self {
            size,
            entry_price,
            leverage,
            margin_usd,
            funding_paid_usd: 0.0,
            liquidation_price: None,
        }
    }

    #[must_use]
    pub fn with_funding(mut self, funding_paid_usd: f64) -> Self {
        self.funding_paid_usd = funding_paid_usd;
        self
    }

    #[must_use]
    pub fn with_liquidation_price(mut self, liquidation_price: f64) -> Self {
        self.liquidation_price = Some(liquidation_price);
        self
    }

    /// Unrealized PnL at `price`.
    pub fn pnl_at(&self, price: f64) -> f64 {
        self.size * (price - self.entry_price)
    }

    fn validate(&self, prefix: &'static [&'static str; 6]) -> Result<(), ValidationError> {
        let fields = [
            self.size,
            self.entry_price,
            self.leverage,
            self.margin_usd,
            self.funding_paid_usd,
        ];
        for (name, value) in prefix.iter().copied().zip(fields) {
            ensure_finite(name, value)?;
        }
        if let Some(price) = self.liquidation_price {
            ensure_finite(prefix[5], price)?;
        }
        Ok(())
    }
}

const HEDGE1_FIELDS: [&str; 6] = [
    "hedge1PositionSize",
    "hedge1EntryPrice",
    "hedge1Leverage",
    "hedge1MarginUsd",
    "hedge1FundingPaidUsd",
    "hedge1LiquidationPrice",
];

const HEDGE2_FIELDS: [&str; 6] = [
    "hedge2PositionSize",
    "hedge2EntryPrice",
    "hedge2Leverage",
    "hedge2MarginUsd",
    "hedge2FundingPaidUsd",
    "hedge2LiquidationPrice",
];

/// Raw point-in-time observation of prices, LP holdings and hedges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Token1 price in USD.
    pub token1_price: f64,
    /// Token2 price in USD.
    pub token2_price: f64,
    /// Pool price (token1 in token2) when read directly from the pool.
    #[serde(default)]
    pub lp_price: Option<f64>,
    pub lp_token1_amount: f64,
    pub lp_token2_amount: f64,
    /// Cumulative fees earned, token1 units.
    #[serde(default)]
    pub lp_token1_fees_earned: f64,
    /// Cumulative fees earned, token2 units.
    #[serde(default)]
    pub lp_token2_fees_earned: f64,
    pub hedge1: HedgeLeg,
    pub hedge2: HedgeLeg,
    pub account_equity_usd: f64,
}

impl Observation {
    /// Pool reference price: the supplied LP price, or `token1 / token2`
    /// when it is missing, zero or NaN.
    pub fn reference_price(&self) -> f64 {
        self.lp_price
            .filter(|p| *p != 0.0 && !p.is_nan())
            .unwrap_or(self.token1_price / self.token2_price)
    }

    /// Checks that every numeric field the engine reads is finite.
    ///
    /// # Errors
    /// [`ValidationError::NonFinite`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("token1Price", self.token1_price),
            ("token2Price", self.token2_price),
            ("lpToken1Amount", self.lp_token1_amount),
            ("lpToken2Amount", self.lp_token2_amount),
            ("lpToken1FeesEarned", self.lp_token1_fees_earned),
            ("lpToken2FeesEarned", self.lp_token2_fees_earned),
            ("accountEquityUsd", self.account_equity_usd),
        ];
        for (name, value) in fields {
            ensure_finite(name, value)?;
        }
        if let Some(price) = self.lp_price {
            ensure_finite("lpPrice", price)?;
        }
        self.hedge1.validate(&HEDGE1_FIELDS)?;
        self.hedge2.validate(&HEDGE2_FIELDS)
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite(name))
    }
}
