use crate::error::ValidationError;
use crate::value_objects::{Percentage, PriceRange};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(pub Uuid);

impl StrategyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrategyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A hedged LP strategy as configured by the operator.
///
/// The engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    #[serde(default)]
    pub id: StrategyId,
    pub name: String,
    pub token1: String,
    pub token2: String,
    /// Informational only.
    #[serde(default)]
    pub lp_protocol: String,
    /// Informational only.
    #[serde(default)]
    pub perp_venue: String,
    pub starting_capital_usd: f64,
    pub open_date: NaiveDate,
    pub range: PriceRange,
    pub price_move_threshold: Percentage,
    pub delta_drift_threshold: Percentage,
    pub cross_position_threshold: Percentage,
}

impl StrategyConfig {
    /// Creates a config with thresholds of 2% price move, 10% delta drift
    /// and a 20% liquidation buffer.
    pub fn new(
        name: impl Into<String>,
        token1: impl Into<String>,
        token2: impl Into<String>,
        starting_capital_usd: f64,
        open_date: NaiveDate,
        range: PriceRange,
    ) -> Self {
        Self {
            id: StrategyId::new(),
            name: name.into(),
            token1: token1.into(),
            token2: token2.into(),
            lp_protocol: String::new(),
            perp_venue: String::new(),
            starting_capital_usd,
            open_date,
            range,
            price_move_threshold: Percentage::new(Decimal::new(2, 2)),
            delta_drift_threshold: Percentage::new(Decimal::new(10, 2)),
            cross_position_threshold: Percentage::new(Decimal::new(20, 2)),
        }
    }

    #[must_use]
    pub fn with_venues(mut self, lp_protocol: impl Into<String>, perp_venue: impl Into<String>) -> Self {
        self.lp_protocol = lp_protocol.into();
        self.perp_venue = perp_venue.into();
        self
    }

    #[must_use]
    pub fn with_thresholds(
        mut self,
        price_move: Percentage,
        delta_drift: Percentage,
        cross_position: Percentage,
    ) -> Self {
        self.price_move_threshold = price_move;
        self.delta_drift_threshold = delta_drift;
        self.cross_position_threshold = cross_position;
        self
    }

    /// Checks `0 < pa < pb`, positive capital and fractional thresholds.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.starting_capital_usd.is_finite() {
            return Err(ValidationError::NonFinite("startingCapitalUsd"));
        }
        if self.starting_capital_usd <= 0.0 {
            return Err(ValidationError::NonPositiveCapital(self.starting_capital_usd));
        }
        if !self.range.is_valid() || !self.range.upper.is_finite() {
            return Err(ValidationError::InvalidRange {
                lower: self.range.lower,
                upper: self.range.upper,
            });
        }
        for (name, threshold) in [
            ("priceMoveThreshold", self.price_move_threshold),
            ("deltaDriftThreshold", self.delta_drift_threshold),
            ("crossPositionThreshold", self.cross_position_threshold),
        ] {
            if !threshold.is_fraction() {
                return Err(ValidationError::ThresholdOutOfRange {
                    name,
                    value: threshold.0.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> StrategyConfig {
        StrategyConfig::new(
            "ETH/USDC",
            "ETH",
            "USDC",
            10_000.0,
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            PriceRange::new(1800.0, 2200.0),
        )
    }

    #[test]
    fn test_default_thresholds() {
        let config = config();
        assert_eq!(config.price_move_threshold.0, dec!(0.02));
        assert_eq!(config.delta_drift_threshold.0, dec!(0.10));
        assert_eq!(config.cross_position_threshold.0, dec!(0.20));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let mut config = config();
        config.range = PriceRange::new(2200.0, 1800.0);
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRange { .. })));
    }

    #[test]
    fn test_rejects_percent_instead_of_fraction() {
        let config = config().with_thresholds(
            Percentage::new(dec!(2)),
            Percentage::new(dec!(0.1)),
            Percentage::new(dec!(0.2)),
        );
        assert!(matches!(
            config.validate(),
            Err(ValidationError::ThresholdOutOfRange { name: "priceMoveThreshold", .. })
        ));
    }

    #[test]
    fn test_rejects_non_positive_capital() {
        let mut config = config();
        config.starting_capital_usd = 0.0;
        assert_eq!(config.validate(), Err(ValidationError::NonPositiveCapital(0.0)));
    }

    #[test]
    fn test_json_round_trip_uses_camel_case() {
        let config = config().with_venues("Uniswap V3", "Hyperliquid");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["startingCapitalUsd"], 10_000.0);
        assert_eq!(json["perpVenue"], "Hyperliquid");

        let parsed: StrategyConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, config);
    }
}
