pub mod concentrated_liquidity;

pub use concentrated_liquidity::{
    LIQUIDITY_DENOMINATOR_FLOOR, LPState, compute_liquidity_from_notional, compute_lp_state,
    estimate_liquidity_fallback,
};
