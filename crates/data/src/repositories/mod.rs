//! Repository interface for strategies and their snapshots.
//!
//! Implementations own storage and must hand the service a consistent view
//! of a strategy and its snapshot history.

mod memory_repository;

pub use memory_repository::InMemorySnapshotRepository;

use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hedge_lp_domain::entities::{Snapshot, SnapshotId, StrategyConfig, StrategyId};

/// Storage for strategies and snapshots.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Inserts or replaces a strategy.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    async fn save_strategy(&self, config: StrategyConfig) -> Result<(), RepositoryError>;

    /// Fetches a strategy.
    ///
    /// # Errors
    /// [`RepositoryError::StrategyNotFound`] if it does not exist.
    async fn get_strategy(&self, id: StrategyId) -> Result<StrategyConfig, RepositoryError>;

    /// Lists every strategy, ordered by open date.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    async fn list_strategies(&self) -> Result<Vec<StrategyConfig>, RepositoryError>;

    /// Deletes a strategy and all of its snapshots.
    ///
    /// Returns the number of snapshots removed.
    ///
    /// # Errors
    /// [`RepositoryError::StrategyNotFound`] if it does not exist.
    async fn delete_strategy(&self, id: StrategyId) -> Result<usize, RepositoryError>;

    /// Stores a new snapshot.
    ///
    /// # Errors
    /// [`RepositoryError::StrategyNotFound`] if its strategy does not exist,
    /// [`RepositoryError::DuplicateSnapshot`] if its id is taken.
    async fn insert_snapshot(&self, snapshot: Snapshot) -> Result<(), RepositoryError>;

    /// Replaces an existing snapshot.
    ///
    /// # Errors
    /// [`RepositoryError::SnapshotNotFound`] if it does not exist.
    async fn update_snapshot(&self, snapshot: Snapshot) -> Result<(), RepositoryError>;

    /// Fetches a snapshot.
    ///
    /// # Errors
    /// [`RepositoryError::SnapshotNotFound`] if it does not exist.
    async fn get_snapshot(&self, id: SnapshotId) -> Result<Snapshot, RepositoryError>;

    /// Lists a strategy's snapshots in ascending timestamp order, ties in
    /// insertion order.
    ///
    /// # Errors
    /// [`RepositoryError::StrategyNotFound`] if the strategy does not exist.
    async fn list_snapshots(&self, strategy_id: StrategyId) -> Result<Vec<Snapshot>, RepositoryError>;

    /// Returns the latest snapshot of a strategy strictly before `before`.
    /// Among snapshots sharing that timestamp the last one inserted wins.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    async fn previous_snapshot(
        &self,
        strategy_id: StrategyId,
        before: DateTime<Utc>,
    ) -> Result<Option<Snapshot>, RepositoryError>;

    /// Deletes a snapshot.
    ///
    /// # Errors
    /// [`RepositoryError::SnapshotNotFound`] if it does not exist.
    async fn delete_snapshot(&self, id: SnapshotId) -> Result<(), RepositoryError>;
}
