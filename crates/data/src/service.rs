//! Snapshot service.
//!
//! Resolves the previous snapshot, runs the pipeline and stores the result.
//! Writes are serialized so that "resolve previous, compute, store" happens
//! atomically for each record.

use crate::error::{RepositoryError, ServiceError};
use crate::repositories::SnapshotRepository;
use chrono::{DateTime, Utc};
use hedge_lp_domain::entities::{Observation, Snapshot, SnapshotId, StrategyConfig, StrategyId};
use hedge_lp_domain::enums::RebalanceReason;
use hedge_lp_domain::value_objects::SnapshotMetrics;
use hedge_lp_engine::params::EngineParameters;
use hedge_lp_engine::pipeline::SnapshotPipeline;
use tokio::sync::Mutex;
use tracing::info;

/// Records and edits snapshots through a [`SnapshotRepository`].
pub struct SnapshotService<R: SnapshotRepository> {
    repository: R,
    pipeline: SnapshotPipeline,
    write_lock: Mutex<()>,
}

impl<R: SnapshotRepository> SnapshotService<R> {
    /// Creates a service over `repository`.
    pub fn new(repository: R, params: EngineParameters) -> Self {
        Self {
            repository,
            pipeline: SnapshotPipeline::new(params),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates and stores a strategy.
    ///
    /// # Errors
    /// [`ServiceError::Validation`] if the config is invalid.
    pub async fn create_strategy(&self, config: StrategyConfig) -> Result<StrategyId, ServiceError> {
        config.validate()?;
        let id = config.id;
        self.repository.save_strategy(config).await?;
        info!(strategy_id = %id, "Strategy created");
        Ok(id)
    }

    /// Records a new observation for a strategy.
    ///
    /// The previous snapshot is the latest one strictly before `timestamp`,
    /// so back-filled observations are measured against the right baseline.
    ///
    /// # Errors
    /// - [`ServiceError::Validation`] if the observation has non-finite fields
    /// - [`ServiceError::Repository`] if the strategy does not exist
    pub async fn record(
        &self,
        strategy_id: StrategyId,
        timestamp: DateTime<Utc>,
        observation: Observation,
    ) -> Result<Snapshot, ServiceError> {
        observation.validate()?;
        let _guard = self.write_lock.lock().await;

        let config = self.repository.get_strategy(strategy_id).await?;
        let previous = self.repository.previous_snapshot(strategy_id, timestamp).await?;
        let metrics = self.pipeline.compute(&config, &observation, previous.as_ref());

        let snapshot = Snapshot::new(strategy_id, timestamp, observation, metrics);
        self.repository.insert_snapshot(snapshot.clone()).await?;

        info!(
            strategy_id = %strategy_id,
            snapshot_id = %snapshot.id,
            reason = %snapshot.metrics.rebalance_reason,
            "Snapshot recorded"
        );
        Ok(snapshot)
    }

    /// Replaces the observation of an existing snapshot and recomputes it.
    ///
    /// The previous snapshot is resolved relative to the edited record's own
    /// timestamp. Snapshots after it keep their stored metrics.
    ///
    /// # Errors
    /// - [`ServiceError::Validation`] if the observation has non-finite fields
    /// - [`ServiceError::Repository`] if the snapshot does not belong to the strategy
    pub async fn edit(
        &self,
        strategy_id: StrategyId,
        snapshot_id: SnapshotId,
        observation: Observation,
    ) -> Result<Snapshot, ServiceError> {
        observation.validate()?;
        let _guard = self.write_lock.lock().await;

        let mut snapshot = self.owned_snapshot(strategy_id, snapshot_id).await?;
        let config = self.repository.get_strategy(strategy_id).await?;
        let previous = self
            .repository
            .previous_snapshot(strategy_id, snapshot.timestamp)
            .await?;

        snapshot.metrics = self.pipeline.compute(&config, &observation, previous.as_ref());
        snapshot.observation = observation;
        self.repository.update_snapshot(snapshot.clone()).await?;

        info!(
            strategy_id = %strategy_id,
            snapshot_id = %snapshot_id,
            reason = %snapshot.metrics.rebalance_reason,
            "Snapshot edited"
        );
        Ok(snapshot)
    }

    /// Marks a snapshot as manually rebalanced by the operator.
    ///
    /// # Errors
    /// [`ServiceError::Repository`] if the snapshot does not belong to the strategy.
    pub async fn mark_manual(
        &self,
        strategy_id: StrategyId,
        snapshot_id: SnapshotId,
    ) -> Result<Snapshot, ServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut snapshot = self.owned_snapshot(strategy_id, snapshot_id).await?;
        snapshot.metrics.rebalance_reason = RebalanceReason::Manual;
        self.repository.update_snapshot(snapshot.clone()).await?;
        info!(snapshot_id = %snapshot_id, "Snapshot marked as manual rebalance");
        Ok(snapshot)
    }

    /// Computes metrics without storing anything.
    ///
    /// # Errors
    /// [`ServiceError::Validation`] if the config or observation is invalid.
    pub fn preview(
        &self,
        config: &StrategyConfig,
        observation: &Observation,
        previous: Option<&Snapshot>,
    ) -> Result<SnapshotMetrics, ServiceError> {
        config.validate()?;
        observation.validate()?;
        Ok(self.pipeline.compute(config, observation, previous))
    }

    /// Snapshot history of a strategy, oldest first.
    ///
    /// # Errors
    /// [`ServiceError::Repository`] if the strategy does not exist.
    pub async fn history(&self, strategy_id: StrategyId) -> Result<Vec<Snapshot>, ServiceError> {
        Ok(self.repository.list_snapshots(strategy_id).await?)
    }

    async fn owned_snapshot(
        &self,
        strategy_id: StrategyId,
        snapshot_id: SnapshotId,
    ) -> Result<Snapshot, ServiceError> {
        let snapshot = self.repository.get_snapshot(snapshot_id).await?;
        if snapshot.strategy_id != strategy_id {
            return Err(RepositoryError::SnapshotNotFound(snapshot_id).into());
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemorySnapshotRepository;
    use chrono::{Duration, NaiveDate, TimeZone};
    use hedge_lp_domain::ValidationError;
    use hedge_lp_domain::entities::HedgeLeg;
    use hedge_lp_domain::value_objects::PriceRange;

    fn service() -> SnapshotService<InMemorySnapshotRepository> {
        SnapshotService::new(InMemorySnapshotRepository::new(), EngineParameters::default())
    }

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

    fn observation(token1_price: f64) -> Observation {
        Observation {
            token1_price,
            token2_price: 1.0,
            lp_price: None,
            lp_token1_amount: 1.3,
            lp_token2_amount: 2600.0,
            lp_token1_fees_earned: 0.0,
            lp_token2_fees_earned: 0.0,
            hedge1: HedgeLeg::new(-1.3, 2000.0, 3.0, 900.0),
            hedge2: HedgeLeg::new(-2600.0, 1.0, 1.0, 2600.0),
            account_equity_usd: 4800.0,
        }
    }

    fn at(hours: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours)
    }

    #[tokio::test]
    async fn test_record_chains_previous() {
        let service = service();
        let id = service.create_strategy(strategy()).await.unwrap();

        let first = service.record(id, at(0), observation(2000.0)).await.unwrap();
        assert!((first.metrics.lp_pnl_usd - 200.0).abs() < 1e-9);
        assert_eq!(first.metrics.rebalance_reason, RebalanceReason::None);

        let second = service.record(id, at(1), observation(2100.0)).await.unwrap();
        // 1.3 ETH gained 100 each
        assert!((second.metrics.lp_pnl_usd - 130.0).abs() < 1e-9);
        assert!(second.metrics.rebalance_reason.is_rebalance());

        assert_eq!(service.history(id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_backfill_uses_nearest_earlier_snapshot() {
        let service = service();
        let id = service.create_strategy(strategy()).await.unwrap();

        service.record(id, at(0), observation(2000.0)).await.unwrap();
        service.record(id, at(10), observation(2150.0)).await.unwrap();

        // Inserted between the two: measured against the first.
        let middle = service.record(id, at(5), observation(2010.0)).await.unwrap();
        assert!((middle.metrics.lp_pnl_usd - 13.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_edit_resolves_previous_from_edited_timestamp() {
        let service = service();
        let id = service.create_strategy(strategy()).await.unwrap();

        service.record(id, at(0), observation(2000.0)).await.unwrap();
        let second = service.record(id, at(1), observation(2050.0)).await.unwrap();
        let third = service.record(id, at(2), observation(2100.0)).await.unwrap();

        let edited = service.edit(id, second.id, observation(2020.0)).await.unwrap();
        // Against the first snapshot (5200), not the third.
        assert!((edited.metrics.lp_pnl_usd - 26.0).abs() < 1e-9);
        assert_eq!(edited.timestamp, second.timestamp);

        // Later snapshots are left as stored.
        let stored_third = service.repository().get_snapshot(third.id).await.unwrap();
        assert_eq!(stored_third.metrics, third.metrics);
    }

    #[tokio::test]
    async fn test_edit_first_snapshot_has_no_previous() {
        let service = service();
        let id = service.create_strategy(strategy()).await.unwrap();

        let first = service.record(id, at(0), observation(2000.0)).await.unwrap();
        service.record(id, at(1), observation(2100.0)).await.unwrap();

        let edited = service.edit(id, first.id, observation(2000.0)).await.unwrap();
        assert!((edited.metrics.lp_pnl_usd - 200.0).abs() < 1e-9);
        assert!(edited.metrics.increments.is_none());
    }

    #[tokio::test]
    async fn test_edit_rejects_snapshot_of_other_strategy() {
        let service = service();
        let a = service.create_strategy(strategy()).await.unwrap();
        let b = service.create_strategy(strategy()).await.unwrap();
        let snapshot = service.record(a, at(0), observation(2000.0)).await.unwrap();

        let err = service.edit(b, snapshot.id, observation(2000.0)).await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::Repository(RepositoryError::SnapshotNotFound(snapshot.id))
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let service = service();
        let mut config = strategy();
        config.range = PriceRange::new(2200.0, 1800.0);
        assert!(matches!(
            service.create_strategy(config).await,
            Err(ServiceError::Validation(ValidationError::InvalidRange { .. }))
        ));

        let id = service.create_strategy(strategy()).await.unwrap();
        let mut obs = observation(2000.0);
        obs.account_equity_usd = f64::NAN;
        assert_eq!(
            service.record(id, at(0), obs).await.unwrap_err(),
            ServiceError::Validation(ValidationError::NonFinite("accountEquityUsd"))
        );
        assert!(service.history(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_unknown_strategy() {
        let service = service();
        let missing = StrategyId::new();
        assert_eq!(
            service.record(missing, at(0), observation(2000.0)).await.unwrap_err(),
            ServiceError::Repository(RepositoryError::StrategyNotFound(missing))
        );
    }

    #[tokio::test]
    async fn test_mark_manual() {
        let service = service();
        let id = service.create_strategy(strategy()).await.unwrap();
        let snapshot = service.record(id, at(0), observation(2000.0)).await.unwrap();

        let marked = service.mark_manual(id, snapshot.id).await.unwrap();
        assert_eq!(marked.metrics.rebalance_reason, RebalanceReason::Manual);
    }

    #[tokio::test]
    async fn test_preview_does_not_store() {
        let service = service();
        let config = strategy();
        service.create_strategy(config.clone()).await.unwrap();

        let metrics = service.preview(&config, &observation(2000.0), None).unwrap();
        assert!((metrics.lp_value_usd - 5200.0).abs() < 1e-9);
        assert!(service.history(config.id).await.unwrap().is_empty());
    }
}
