use hedge_lp_domain::ValidationError;
use hedge_lp_domain::entities::{SnapshotId, StrategyId};
use thiserror::Error;

/// Storage-level failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepositoryError {
    #[error("strategy not found: {0}")]
    StrategyNotFound(StrategyId),
    #[error("snapshot not found: {0}")]
    SnapshotNotFound(SnapshotId),
    #[error("snapshot already exists: {0}")]
    DuplicateSnapshot(SnapshotId),
}

/// Failures surfaced by [`crate::SnapshotService`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
