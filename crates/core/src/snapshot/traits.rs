use async_trait::async_trait;

use super::model::{
    BrokerageAccountMonthlySnapshot, DepositAccountMonthlySnapshot, MetalHoldingMonthlySnapshot,
    RealEstateMonthlySnapshot,
};
use crate::errors::Result;

#[async_trait]
pub trait DepositAccountSnapshotRepositoryTrait: Send + Sync {
    async fn upsert(&self, snapshot: &DepositAccountMonthlySnapshot) -> Result<()>;
    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<DepositAccountMonthlySnapshot>>;
}

#[async_trait]
pub trait BrokerageAccountSnapshotRepositoryTrait: Send + Sync {
    async fn upsert(&self, snapshot: &BrokerageAccountMonthlySnapshot) -> Result<()>;
    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<BrokerageAccountMonthlySnapshot>>;
}

#[async_trait]
pub trait MetalHoldingSnapshotRepositoryTrait: Send + Sync {
    async fn upsert(&self, snapshot: &MetalHoldingMonthlySnapshot) -> Result<()>;
    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<MetalHoldingMonthlySnapshot>>;
}

#[async_trait]
pub trait RealEstateSnapshotRepositoryTrait: Send + Sync {
    async fn upsert(&self, snapshot: &RealEstateMonthlySnapshot) -> Result<()>;
    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<RealEstateMonthlySnapshot>>;
}
