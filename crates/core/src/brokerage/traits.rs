use async_trait::async_trait;

use super::model::{
    BrokerageAccount, BrokerageDepositLink, BrokerageEvent, Holding, Instrument, NewBrokerageEvent,
};
use crate::errors::Result;

#[async_trait]
pub trait BrokerageAccountRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, account_id: &str) -> Result<BrokerageAccount>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<BrokerageAccount>>;
}

/// Links a `BrokerageAccount` to its cash lines. At most one link per
/// `(brokerage_account_id, currency)` (spec §3, §6.4).
#[async_trait]
pub trait BrokerageDepositLinkRepositoryTrait: Send + Sync {
    async fn create(&self, link: BrokerageDepositLink) -> Result<BrokerageDepositLink>;
    async fn list_for_brokerage(&self, brokerage_account_id: &str) -> Result<Vec<BrokerageDepositLink>>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait InstrumentRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, instrument_id: &str) -> Result<Instrument>;
}

#[async_trait]
pub trait BrokerageEventRepositoryTrait: Send + Sync {
    async fn insert(&self, event: NewBrokerageEvent, seq: i64) -> Result<BrokerageEvent>;
    async fn delete(&self, event_id: &str) -> Result<BrokerageEvent>;
    /// All events for one `(account, instrument)` pair, any order — the
    /// projector sorts them (spec §4.2).
    async fn list_for_position(&self, account_id: &str, instrument_id: &str) -> Result<Vec<BrokerageEvent>>;
    /// All events for an account across every instrument, any order. Used
    /// by the aggregator to derive `events_per_month` (spec §6.2).
    async fn list_for_account(&self, account_id: &str) -> Result<Vec<BrokerageEvent>>;
    async fn next_seq(&self, account_id: &str, instrument_id: &str) -> Result<i64>;
}

#[async_trait]
pub trait HoldingRepositoryTrait: Send + Sync {
    async fn upsert(&self, account_id: &str, instrument_id: &str, holding: Holding) -> Result<()>;
    async fn get(&self, account_id: &str, instrument_id: &str) -> Result<Option<Holding>>;
    async fn list_for_account(&self, account_id: &str) -> Result<Vec<(String, Holding)>>;
}
