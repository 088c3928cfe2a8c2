use async_trait::async_trait;

use super::model::{NewWallet, Wallet};
use crate::errors::Result;

#[async_trait]
pub trait WalletRepositoryTrait: Send + Sync {
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet>;
    async fn get_by_id(&self, wallet_id: &str) -> Result<Wallet>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Wallet>>;
    async fn delete(&self, wallet_id: &str) -> Result<()>;
}
