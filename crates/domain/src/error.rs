use thiserror::Error;

/// Failures of the notional-to-liquidity inversion.
///
/// Both variants are recoverable: the snapshot pipeline answers them with
/// [`crate::math::concentrated_liquidity::estimate_liquidity_fallback`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LiquidityError {
    /// A price or bound is non-positive, or the range is inverted.
    #[error("invalid range for liquidity: p0={p0}, pa={pa}, pb={pb}")]
    InvalidRange {
        /// Reference price.
        p0: f64,
        /// Lower bound.
        pa: f64,
        /// Upper bound.
        pb: f64,
    },
    /// The value-per-unit-liquidity denominator is not positive.
    #[error("degenerate range for liquidity: denominator={denominator} (p0={p0}, pa={pa}, pb={pb})")]
    DegenerateRange {
        /// Computed denominator.
        denominator: f64,
        /// Reference price.
        p0: f64,
        /// Lower bound.
        pa: f64,
        /// Upper bound.
        pb: f64,
    },
}

/// Violations of the caller contract on configs and observations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required numeric field is NaN or infinite.
    #[error("field `{0}` must be a finite number")]
    NonFinite(&'static str),
    /// Range bounds are not `0 < lower < upper`.
    #[error("price range must satisfy 0 < lower < upper (lower={lower}, upper={upper})")]
    InvalidRange {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// A threshold is outside `[0, 1]`; thresholds are fractions, not percents.
    #[error("threshold `{name}` must be a fraction in [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Threshold name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
    /// Starting capital must be strictly positive.
    #[error("starting capital must be positive, got {0}")]
    NonPositiveCapital(f64),
}
