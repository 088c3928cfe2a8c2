use async_trait::async_trait;

use super::model::{MetalHolding, NewMetalHolding};
use crate::errors::Result;

#[async_trait]
pub trait MetalHoldingRepositoryTrait: Send + Sync {
    async fn create(&self, new_holding: NewMetalHolding) -> Result<MetalHolding>;
    async fn get_by_id(&self, id: &str) -> Result<MetalHolding>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<MetalHolding>>;
    /// `None` persists the reduction as a delete (grams reached zero).
    async fn save_or_delete(&self, id: &str, updated: Option<MetalHolding>) -> Result<()>;
}
