use async_trait::async_trait;

use super::model::{Debt, RecurringExpense, UserNote, YearGoal};
use crate::errors::Result;

#[async_trait]
pub trait DebtRepositoryTrait: Send + Sync {
    async fn create(&self, debt: Debt) -> Result<Debt>;
    async fn get_by_id(&self, id: &str) -> Result<Debt>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<Debt>>;
    async fn update(&self, debt: Debt) -> Result<Debt>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait RecurringExpenseRepositoryTrait: Send + Sync {
    async fn create(&self, expense: RecurringExpense) -> Result<RecurringExpense>;
    async fn get_by_id(&self, id: &str) -> Result<RecurringExpense>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<RecurringExpense>>;
    async fn update(&self, expense: RecurringExpense) -> Result<RecurringExpense>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait YearGoalRepositoryTrait: Send + Sync {
    async fn create(&self, goal: YearGoal) -> Result<YearGoal>;
    async fn get_by_id(&self, id: &str) -> Result<YearGoal>;
    async fn list_for_wallet(&self, wallet_id: &str, year: i32) -> Result<Vec<YearGoal>>;
    async fn update(&self, goal: YearGoal) -> Result<YearGoal>;
    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
pub trait UserNoteRepositoryTrait: Send + Sync {
    async fn create(&self, note: UserNote) -> Result<UserNote>;
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<UserNote>>;
    async fn update(&self, note: UserNote) -> Result<UserNote>;
    async fn delete(&self, id: &str) -> Result<()>;
}
