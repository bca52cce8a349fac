pub mod observation;
pub mod snapshot;
pub mod strategy;

pub use observation::{HedgeLeg, Observation};
pub use snapshot::{Snapshot, SnapshotId};
pub use strategy::{StrategyConfig, StrategyId};
