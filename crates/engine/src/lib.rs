//! Snapshot engine for a delta-hedged concentrated-liquidity position.
//!
//! Given a strategy, a raw observation and the previous snapshot, the engine
//! derives the LP's mark-to-market state, the hedge sizes that neutralize
//! it, the rebalance classification and the risk metrics.
//!
//! Everything here is synchronous and free of side effects.

/// Hedge targets, adjustments and exposure.
pub mod hedge;
/// Engine-wide parameters.
pub mod params;
/// The snapshot pipeline.
pub mod pipeline;
/// Convenient re-exports.
pub mod prelude;
/// Rebalance triggers and classification.
pub mod triggers;
