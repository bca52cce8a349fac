//! In-memory repository.

use super::SnapshotRepository;
use crate::error::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hedge_lp_domain::entities::{Snapshot, SnapshotId, StrategyConfig, StrategyId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A snapshot tagged with its insertion order. Snapshots sharing a timestamp
/// are ordered by `sequence`.
#[derive(Debug)]
struct StoredSnapshot {
    sequence: u64,
    snapshot: Snapshot,
}

impl StoredSnapshot {
    fn sort_key(&self) -> (DateTime<Utc>, u64) {
        (self.snapshot.timestamp, self.sequence)
    }
}

#[derive(Debug, Default)]
struct Store {
    strategies: HashMap<StrategyId, StrategyConfig>,
    snapshots: HashMap<SnapshotId, StoredSnapshot>,
    next_sequence: u64,
}

/// Repository backed by process memory. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemorySnapshotRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotRepository for InMemorySnapshotRepository {
    async fn save_strategy(&self, config: StrategyConfig) -> Result<(), RepositoryError> {
        debug!(strategy_id = %config.id, name = %config.name, "Saving strategy");
        self.store.write().await.strategies.insert(config.id, config);
        Ok(())
    }

    async fn get_strategy(&self, id: StrategyId) -> Result<StrategyConfig, RepositoryError> {
        self.store
            .read()
            .await
            .strategies
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::StrategyNotFound(id))
    }

    async fn list_strategies(&self) -> Result<Vec<StrategyConfig>, RepositoryError> {
        let store = self.store.read().await;
        let mut strategies: Vec<_> = store.strategies.values().cloned().collect();
        strategies.sort_by_key(|s| s.open_date);
        Ok(strategies)
    }

    async fn delete_strategy(&self, id: StrategyId) -> Result<usize, RepositoryError> {
        let mut store = self.store.write().await;
        if store.strategies.remove(&id).is_none() {
            return Err(RepositoryError::StrategyNotFound(id));
        }

        let before = store.snapshots.len();
        store.snapshots.retain(|_, s| s.snapshot.strategy_id != id);
        let removed = before - store.snapshots.len();
        debug!(strategy_id = %id, removed, "Deleted strategy");
        Ok(removed)
    }

    async fn insert_snapshot(&self, snapshot: Snapshot) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        if !store.strategies.contains_key(&snapshot.strategy_id) {
            return Err(RepositoryError::StrategyNotFound(snapshot.strategy_id));
        }
        if store.snapshots.contains_key(&snapshot.id) {
            return Err(RepositoryError::DuplicateSnapshot(snapshot.id));
        }

        debug!(snapshot_id = %snapshot.id, timestamp = %snapshot.timestamp, "Inserting snapshot");
        let sequence = store.next_sequence;
        store.next_sequence += 1;
        store
            .snapshots
            .insert(snapshot.id, StoredSnapshot { sequence, snapshot });
        Ok(())
    }

    async fn update_snapshot(&self, snapshot: Snapshot) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        match store.snapshots.get_mut(&snapshot.id) {
            Some(existing) => {
                existing.snapshot = snapshot;
                Ok(())
            }
            None => Err(RepositoryError::SnapshotNotFound(snapshot.id)),
        }
    }

    async fn get_snapshot(&self, id: SnapshotId) -> Result<Snapshot, RepositoryError> {
        self.store
            .read()
            .await
            .snapshots
            .get(&id)
            .map(|s| s.snapshot.clone())
            .ok_or(RepositoryError::SnapshotNotFound(id))
    }

    async fn list_snapshots(&self, strategy_id: StrategyId) -> Result<Vec<Snapshot>, RepositoryError> {
        let store = self.store.read().await;
        if !store.strategies.contains_key(&strategy_id) {
            return Err(RepositoryError::StrategyNotFound(strategy_id));
        }

        let mut stored: Vec<_> = store
            .snapshots
            .values()
            .filter(|s| s.snapshot.strategy_id == strategy_id)
            .collect();
        stored.sort_by_key(|s| s.sort_key());
        Ok(stored.into_iter().map(|s| s.snapshot.clone()).collect())
    }

    async fn previous_snapshot(
        &self,
        strategy_id: StrategyId,
        before: DateTime<Utc>,
    ) -> Result<Option<Snapshot>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .snapshots
            .values()
            .filter(|s| s.snapshot.strategy_id == strategy_id && s.snapshot.timestamp < before)
            .max_by_key(|s| s.sort_key())
            .map(|s| s.snapshot.clone()))
    }

    async fn delete_snapshot(&self, id: SnapshotId) -> Result<(), RepositoryError> {
        self.store
            .write()
            .await
            .snapshots
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::SnapshotNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};
    use hedge_lp_domain::entities::{HedgeLeg, Observation};
    use hedge_lp_domain::value_objects::PriceRange;
    use hedge_lp_engine::pipeline::SnapshotPipeline;

    fn strategy() -> StrategyConfig {
        StrategyConfig::new(
            "ETH/USDC",
            "ETH",
            "USDC",
            10_000.0,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            PriceRange::new(1800.0, 2200.0),
        )
    }

    fn snapshot_at(config: &StrategyConfig, hours: i64) -> Snapshot {
        let obs = Observation {
            token1_price: 2000.0,
            token2_price: 1.0,
            lp_price: None,
            lp_token1_amount: 1.0,
            lp_token2_amount: 2000.0,
            lp_token1_fees_earned: 0.0,
            lp_token2_fees_earned: 0.0,
            hedge1: HedgeLeg::new(-1.0, 2000.0, 2.0, 1000.0),
            hedge2: HedgeLeg::new(0.0, 1.0, 1.0, 0.0),
            account_equity_usd: 6000.0,
        };
        let metrics = SnapshotPipeline::default().compute(config, &obs, None);
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours);
        Snapshot::new(config.id, timestamp, obs, metrics)
    }

    #[tokio::test]
    async fn test_snapshots_listed_in_time_order() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        repo.save_strategy(config.clone()).await.unwrap();

        for hours in [5, 1, 3] {
            repo.insert_snapshot(snapshot_at(&config, hours)).await.unwrap();
        }

        let listed = repo.list_snapshots(config.id).await.unwrap();
        let hours: Vec<_> = listed
            .iter()
            .map(|s| (s.timestamp - listed[0].timestamp).num_hours())
            .collect();
        assert_eq!(hours, vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_previous_is_strictly_earlier() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        repo.save_strategy(config.clone()).await.unwrap();

        let first = snapshot_at(&config, 0);
        let second = snapshot_at(&config, 2);
        repo.insert_snapshot(first.clone()).await.unwrap();
        repo.insert_snapshot(second.clone()).await.unwrap();

        let prev = repo.previous_snapshot(config.id, second.timestamp).await.unwrap();
        assert_eq!(prev.map(|s| s.id), Some(first.id));

        let prev = repo.previous_snapshot(config.id, first.timestamp).await.unwrap();
        assert!(prev.is_none());

        // Between the two: still the first one.
        let between = first.timestamp + Duration::hours(1);
        let prev = repo.previous_snapshot(config.id, between).await.unwrap();
        assert_eq!(prev.map(|s| s.id), Some(first.id));
    }

    #[tokio::test]
    async fn test_shared_timestamp_resolves_to_latest_insert() {
        for _ in 0..32 {
            let repo = InMemorySnapshotRepository::new();
            let config = strategy();
            repo.save_strategy(config.clone()).await.unwrap();

            let first = snapshot_at(&config, 0);
            let second = snapshot_at(&config, 0);
            repo.insert_snapshot(first.clone()).await.unwrap();
            repo.insert_snapshot(second.clone()).await.unwrap();

            let later = first.timestamp + Duration::hours(1);
            let prev = repo.previous_snapshot(config.id, later).await.unwrap();
            assert_eq!(prev.map(|s| s.id), Some(second.id));

            let ids: Vec<_> = repo
                .list_snapshots(config.id)
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.id)
                .collect();
            assert_eq!(ids, vec![first.id, second.id]);
        }
    }

    #[tokio::test]
    async fn test_update_keeps_insertion_order() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        repo.save_strategy(config.clone()).await.unwrap();

        let mut first = snapshot_at(&config, 0);
        let second = snapshot_at(&config, 0);
        repo.insert_snapshot(first.clone()).await.unwrap();
        repo.insert_snapshot(second.clone()).await.unwrap();

        first.observation.account_equity_usd = 6500.0;
        repo.update_snapshot(first.clone()).await.unwrap();

        let later = first.timestamp + Duration::hours(1);
        let prev = repo.previous_snapshot(config.id, later).await.unwrap();
        assert_eq!(prev.map(|s| s.id), Some(second.id));
    }

    #[tokio::test]
    async fn test_previous_ignores_other_strategies() {
        let repo = InMemorySnapshotRepository::new();
        let a = strategy();
        let b = strategy();
        repo.save_strategy(a.clone()).await.unwrap();
        repo.save_strategy(b.clone()).await.unwrap();
        repo.insert_snapshot(snapshot_at(&b, 0)).await.unwrap();

        let later = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        assert!(repo.previous_snapshot(a.id, later).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_strategy_cascades() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        repo.save_strategy(config.clone()).await.unwrap();
        let snapshot = snapshot_at(&config, 0);
        repo.insert_snapshot(snapshot.clone()).await.unwrap();
        repo.insert_snapshot(snapshot_at(&config, 1)).await.unwrap();

        assert_eq!(repo.delete_strategy(config.id).await.unwrap(), 2);
        assert_eq!(
            repo.get_snapshot(snapshot.id).await,
            Err(RepositoryError::SnapshotNotFound(snapshot.id))
        );
        assert_eq!(
            repo.delete_strategy(config.id).await,
            Err(RepositoryError::StrategyNotFound(config.id))
        );
    }

    #[tokio::test]
    async fn test_insert_requires_strategy_and_unique_id() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        let snapshot = snapshot_at(&config, 0);

        assert_eq!(
            repo.insert_snapshot(snapshot.clone()).await,
            Err(RepositoryError::StrategyNotFound(config.id))
        );

        repo.save_strategy(config).await.unwrap();
        repo.insert_snapshot(snapshot.clone()).await.unwrap();
        assert_eq!(
            repo.insert_snapshot(snapshot.clone()).await,
            Err(RepositoryError::DuplicateSnapshot(snapshot.id))
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_snapshot() {
        let repo = InMemorySnapshotRepository::new();
        let config = strategy();
        repo.save_strategy(config.clone()).await.unwrap();
        let mut snapshot = snapshot_at(&config, 0);
        repo.insert_snapshot(snapshot.clone()).await.unwrap();

        snapshot.observation.account_equity_usd = 7000.0;
        repo.update_snapshot(snapshot.clone()).await.unwrap();
        let stored = repo.get_snapshot(snapshot.id).await.unwrap();
        assert_eq!(stored.observation.account_equity_usd, 7000.0);

        repo.delete_snapshot(snapshot.id).await.unwrap();
        assert_eq!(
            repo.update_snapshot(snapshot.clone()).await,
            Err(RepositoryError::SnapshotNotFound(snapshot.id))
        );
    }
}
