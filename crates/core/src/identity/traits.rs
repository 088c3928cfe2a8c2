use async_trait::async_trait;

use super::model::{Bank, User};
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, user_id: &str) -> Result<User>;
}

#[async_trait]
pub trait BankRepositoryTrait: Send + Sync {
    async fn get_by_id(&self, bank_id: &str) -> Result<Bank>;
    async fn list(&self) -> Result<Vec<Bank>>;
}
