use async_trait::async_trait;

use crate::errors::Result;
use crate::money::RateTable;

/// Narrow capability interface for the FX source (spec §6.3, §9). The core
/// never scrapes FX itself: the caller (UI pulling NBP rates, or a scheduled
/// job) supplies the table, or it is loaded from a persisted monthly
/// snapshot. No network access happens behind this trait inside the
/// valuation core itself.
#[async_trait]
pub trait FxSource: Send + Sync {
    /// Current live rate table against the implicit pivot currency.
    async fn current_rates(&self) -> Result<RateTable>;
}

/// Repository for persisted FX monthly snapshots.
#[async_trait]
pub trait FxSnapshotRepositoryTrait: Send + Sync {
    async fn upsert(&self, snapshot: &super::model::FxMonthlySnapshot) -> Result<()>;
    async fn get(&self, month_key: &str) -> Result<Option<super::model::FxMonthlySnapshot>>;
    async fn get_many(&self, month_keys: &[String]) -> Result<Vec<super::model::FxMonthlySnapshot>>;
}
