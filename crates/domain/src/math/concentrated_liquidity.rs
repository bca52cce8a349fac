use crate::enums::RangePosition;
use crate::error::LiquidityError;
use crate::value_objects::PriceRange;
use serde::{Deserialize, Serialize};

/// Lower bound applied to the fallback estimator's denominator.
pub const LIQUIDITY_DENOMINATOR_FLOOR: f64 = 0.001;

/// Token holdings and exposure of a position at one price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LPState {
    /// Token1 amount.
    pub x: f64,
    /// Token2 amount.
    pub y: f64,
    /// Portfolio value in token2 (USD) terms.
    pub value: f64,
    /// Token1 exposure.
    pub delta: f64,
    pub position: RangePosition,
}

impl LPState {
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            value: 0.0,
            delta: 0.0,
            position: RangePosition::BelowRange,
        }
    }
}

/// Computes the state of a position with liquidity `liquidity` on `[pa, pb]` at price `p`.
///
/// - `p <= 0`: all-zero state
/// - `p < pa`: y = L * (sqrt(pb) - sqrt(pa)), value = y, delta = 0
/// - `p > pb`: x = L * (1/sqrt(pa) - 1/sqrt(pb)), value = x * p, delta = x
/// - otherwise: x = L * (1/sqrt(p) - 1/sqrt(pb)), y = L * (sqrt(p) - sqrt(pa)),
///   value = x * p + y, delta = x
pub fn compute_lp_state(p: f64, liquidity: f64, pa: f64, pb: f64) -> LPState {
    if p <= 0.0 {
        return LPState::zero();
    }

    let sqrt_pa = pa.sqrt();
    let sqrt_pb = pb.sqrt();

    match PriceRange::new(pa, pb).position_of(p) {
        RangePosition::BelowRange => {
            let y = liquidity * (sqrt_pb - sqrt_pa);
            LPState {
                x: 0.0,
                y,
                value: y,
                delta: 0.0,
                position: RangePosition::BelowRange,
            }
        }
        RangePosition::AboveRange => {
            let x = liquidity * (1.0 / sqrt_pa - 1.0 / sqrt_pb);
            LPState {
                x,
                y: 0.0,
                value: x * p,
                delta: x,
                position: RangePosition::AboveRange,
            }
        }
        RangePosition::InRange => {
            let sqrt_p = p.sqrt();
            let x = liquidity * (1.0 / sqrt_p - 1.0 / sqrt_pb);
            let y = liquidity * (sqrt_p - sqrt_pa);
            LPState {
                x,
                y,
                value: x * p + y,
                delta: x,
                position: RangePosition::InRange,
            }
        }
    }
}

/// Value held per unit of liquidity at `p0` inside `[pa, pb]`:
/// (1/sqrt(p0) - 1/sqrt(pb)) * p0 + (sqrt(p0) - sqrt(pa))
fn value_per_liquidity(p0: f64, pa: f64, pb: f64) -> f64 {
    let sqrt_p0 = p0.sqrt();
    (1.0 / sqrt_p0 - 1.0 / pb.sqrt()) * p0 + (sqrt_p0 - pa.sqrt())
}

/// Liquidity constant that makes a position on `[pa, pb]` worth `notional` at `p0`.
///
/// # Errors
/// - [`LiquidityError::InvalidRange`] if any price is non-positive or `pa >= pb`
/// - [`LiquidityError::DegenerateRange`] if the value-per-liquidity denominator is `<= 0`
pub fn compute_liquidity_from_notional(
    notional: f64,
    p0: f64,
    pa: f64,
    pb: f64,
) -> Result<f64, LiquidityError> {
    if p0 <= 0.0 || pa <= 0.0 || pb <= 0.0 || !(pa < pb) {
        return Err(LiquidityError::InvalidRange { p0, pa, pb });
    }

    let denominator = value_per_liquidity(p0, pa, pb);
    if denominator <= 0.0 {
        return Err(LiquidityError::DegenerateRange {
            denominator,
            p0,
            pa,
            pb,
        });
    }

    Ok(notional / denominator)
}

/// Algebraic liquidity estimate used when the exact inversion fails.
///
/// Uses the range midpoint in place of `p0` for the token1 term, `price`
/// clamped into `[pa, pb]` for the token2 term, and floors the denominator
/// at [`LIQUIDITY_DENOMINATOR_FLOOR`].
pub fn estimate_liquidity_fallback(notional: f64, price: f64, pa: f64, pb: f64) -> f64 {
    let mid = (pa + pb) / 2.0;
    let sqrt_pa = pa.sqrt();
    let sqrt_p = pa.max(pb.min(price)).sqrt();

    let range_factor = (1.0 / sqrt_pa - 1.0 / pb.sqrt()) * mid + (sqrt_p - sqrt_pa);
    notional / range_factor.max(LIQUIDITY_DENOMINATOR_FLOOR)
}
