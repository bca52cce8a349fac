use serde::{Deserialize, Serialize};

/// Distance to liquidation of one leg, in percent of `price`.
///
/// Returns `None` when no positive liquidation price is configured. A long
/// (`size > 0`) is liquidated on the way down, anything else on the way up.
pub fn leg_liquidation_buffer(price: f64, liquidation_price: Option<f64>, size: f64) -> Option<f64> {
    let liquidation_price = liquidation_price.filter(|p| *p > 0.0)?;

    let buffer = if size > 0.0 {
        (price - liquidation_price) / price * 100.0
    } else {
        (liquidation_price - price) / price * 100.0
    };
    Some(buffer)
}

/// Liquidation buffer of the most at-risk hedge leg, or `None` if neither
/// leg has a liquidation price.
pub fn calculate_liquidation_buffer(
    price1: f64,
    price2: f64,
    liquidation_price1: Option<f64>,
    liquidation_price2: Option<f64>,
    size1: f64,
    size2: f64,
) -> Option<f64> {
    let buffers = [
        leg_liquidation_buffer(price1, liquidation_price1, size1),
        leg_liquidation_buffer(price2, liquidation_price2, size2),
    ];

    buffers.into_iter().flatten().reduce(f64::min)
}

/// Coarse risk band for a liquidation buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidationRisk {
    /// More than 30% away.
    Safe,
    /// More than 20% away.
    Caution,
    Danger,
}

impl LiquidationRisk {
    pub fn from_buffer(buffer_pct: f64) -> Self {
        if buffer_pct > 30.0 {
            Self::Safe
        } else if buffer_pct > 20.0 {
            Self::Caution
        } else {
            Self::Danger
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_and_short_legs() {
        // Long at 100, liquidated at 80 -> 20% room.
        let long = leg_liquidation_buffer(100.0, Some(80.0), 1.5).unwrap();
        assert!((long - 20.0).abs() < 1e-12);

        // Short at 100, liquidated at 125 -> 25% room.
        let short = leg_liquidation_buffer(100.0, Some(125.0), -1.5).unwrap();
        assert!((short - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_size_counts_as_short() {
        let above = leg_liquidation_buffer(100.0, Some(125.0), 0.0).unwrap();
        assert!((above - 25.0).abs() < 1e-12);

        let below = leg_liquidation_buffer(100.0, Some(80.0), 0.0).unwrap();
        assert!((below + 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_unset_or_non_positive_liquidation_price() {
        assert_eq!(leg_liquidation_buffer(100.0, None, -1.0), None);
        assert_eq!(leg_liquidation_buffer(100.0, Some(0.0), -1.0), None);
        assert_eq!(leg_liquidation_buffer(100.0, Some(-3.0), 1.0), None);
    }

    #[test]
    fn test_minimum_across_legs() {
        let buffer =
            calculate_liquidation_buffer(2000.0, 1.0, Some(2600.0), Some(1.1), -0.5, -100.0).unwrap();
        // leg1: 30%, leg2: 10%
        assert!((buffer - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_configured_leg() {
        let buffer = calculate_liquidation_buffer(2000.0, 1.0, None, Some(1.5), -0.5, -100.0).unwrap();
        assert!((buffer - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_configured_legs() {
        assert_eq!(calculate_liquidation_buffer(2000.0, 1.0, None, None, -0.5, -100.0), None);
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(LiquidationRisk::from_buffer(45.0), LiquidationRisk::Safe);
        assert_eq!(LiquidationRisk::from_buffer(30.0), LiquidationRisk::Caution);
        assert_eq!(LiquidationRisk::from_buffer(25.0), LiquidationRisk::Caution);
        assert_eq!(LiquidationRisk::from_buffer(20.0), LiquidationRisk::Danger);
        assert_eq!(LiquidationRisk::from_buffer(-5.0), LiquidationRisk::Danger);
    }
}
