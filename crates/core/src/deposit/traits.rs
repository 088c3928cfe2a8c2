use async_trait::async_trait;
use rust_decimal::Decimal;

use super::model::{
    CapitalGain, DepositAccount, DepositAccountBalance, NewDepositAccount, Transaction,
};
use crate::errors::Result;

#[async_trait]
pub trait DepositAccountRepositoryTrait: Send + Sync {
    async fn create(&self, new_account: NewDepositAccount, fingerprint: String, ciphertext: Vec<u8>) -> Result<DepositAccount>;
    async fn get_by_id(&self, account_id: &str) -> Result<DepositAccount>;
    async fn get_balance(&self, account_id: &str) -> Result<DepositAccountBalance>;
    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<DepositAccount>>;
    async fn update_name(&self, account_id: &str, name: &str) -> Result<DepositAccount>;
    async fn delete(&self, account_id: &str) -> Result<()>;
}

/// Append-only ledger repository. `insert_batch` is the single mutating
/// entry point and must apply every row plus the final balance update
/// inside one transaction (spec §4.6, §5).
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    async fn insert_batch(
        &self,
        account_id: &str,
        rows: Vec<ComputedTransaction>,
        final_available: Decimal,
    ) -> Result<Vec<Transaction>>;

    async fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>>;

    /// Transactions from `from_date` (inclusive) forward, in chain order,
    /// used to recompute the balance chain after a batch update (spec §4.6).
    async fn list_from_date(&self, account_id: &str, from_date: chrono::NaiveDate) -> Result<Vec<Transaction>>;

    async fn update_amount(&self, transaction_id: &str, amount: Decimal) -> Result<()>;
}

#[async_trait]
pub trait CapitalGainRepositoryTrait: Send + Sync {
    async fn create(&self, capital_gain: &CapitalGain) -> Result<()>;
}

/// A fully computed transaction row, ready to persist: the balance chain
/// invariant has already been enforced by
/// [`crate::deposit::service::compute_chain`].
#[derive(Debug, Clone)]
pub struct ComputedTransaction {
    pub date: chrono::NaiveDate,
    pub amount: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub capital_gain_kind: Option<super::model::CapitalGainKind>,
}
