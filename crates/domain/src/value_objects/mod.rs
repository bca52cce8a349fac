pub mod percentage;
pub mod price_range;
pub mod snapshot_metrics;

pub use percentage::Percentage;
pub use price_range::PriceRange;
pub use snapshot_metrics::{
    FlowIncrements, HedgeRebalanceSuggestion, LegSuggestion, SnapshotMetrics,
};
