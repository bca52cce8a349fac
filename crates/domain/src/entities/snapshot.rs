use crate::entities::observation::Observation;
use crate::entities::strategy::StrategyId;
use crate::value_objects::SnapshotMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored observation together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: SnapshotId,
    pub strategy_id: StrategyId,
    pub timestamp: DateTime<Utc>,
    pub observation: Observation,
    pub metrics: SnapshotMetrics,
}

impl Snapshot {
    pub fn new(
        strategy_id: StrategyId,
        timestamp: DateTime<Utc>,
        observation: Observation,
        metrics: SnapshotMetrics,
    ) -> Self {
        Self {
            id: SnapshotId::new(),
            strategy_id,
            timestamp,
            observation,
            metrics,
        }
    }
}
