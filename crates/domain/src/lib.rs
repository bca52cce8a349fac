//! Domain model for a delta-hedged concentrated-liquidity position.
//!
//! This crate holds the pure building blocks:
//! - Strategy configuration, raw observations and stored snapshots
//! - Square-root-price liquidity math
//! - Hedge quality, liquidation buffer and cross-position metrics
//! - Error types shared by the engine and the data layer

/// Entities: strategies, observations and snapshots.
pub mod entities;
/// Shared enums.
pub mod enums;
/// Error types.
pub mod error;
/// Concentrated liquidity math.
pub mod math;
/// Quality and risk metrics.
pub mod metrics;
/// Value objects.
pub mod value_objects;

pub use error::{LiquidityError, ValidationError};
