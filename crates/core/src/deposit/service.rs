//! Transaction & Balance Invariant (spec §4.6). The chain computation is a
//! pure function so the balance-chain invariant in spec §8 is directly
//! testable without a database; the service wraps it with the repository
//! call that persists everything inside one transaction.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::model::{AccountType, CapitalGain, NewTransactionRow, Transaction};
use super::traits::{CapitalGainRepositoryTrait, ComputedTransaction, DepositAccountRepositoryTrait, TransactionRepositoryTrait};
use crate::errors::{Error, Result, ValidationError};

/// Applies `rows` in order on top of `starting_balance`, producing the
/// balance-chain-consistent [`ComputedTransaction`]s. Rejects any row that
/// would drive `available` negative unless `allow_negative` is set (CREDIT
/// accounts, spec §4.6). A caller-supplied `balance_after` is checked
/// against the computed value and rejected as a validation error on
/// mismatch rather than silently overridden.
pub fn compute_chain(
    account_id: &str,
    starting_balance: Decimal,
    rows: &[NewTransactionRow],
    allow_negative: bool,
) -> Result<Vec<ComputedTransaction>> {
    let mut running = starting_balance;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let balance_before = running;
        let balance_after = balance_before + row.amount;
        if balance_after.is_sign_negative() && !allow_negative {
            return Err(ValidationError::NegativeBalance {
                account_id: account_id.to_string(),
            }
            .into());
        }
        if let Some(declared) = row.balance_after {
            if declared != balance_after {
                return Err(ValidationError::InvalidInput(format!(
                    "declared balance_after {declared} does not match computed {balance_after}"
                ))
                .into());
            }
        }
        out.push(ComputedTransaction {
            date: row.date,
            amount: row.amount,
            balance_before,
            balance_after,
            description: row.description.clone(),
            category: row.category.clone(),
            capital_gain_kind: row.capital_gain_kind,
        });
        running = balance_after;
    }
    Ok(out)
}

pub struct TransactionService {
    accounts: Arc<dyn DepositAccountRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    capital_gains: Arc<dyn CapitalGainRepositoryTrait>,
}

impl TransactionService {
    pub fn new(
        accounts: Arc<dyn DepositAccountRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        capital_gains: Arc<dyn CapitalGainRepositoryTrait>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            capital_gains,
        }
    }

    /// Batch-creates transactions on one account (spec §4.6, HTTP surface
    /// `POST /wallet/{user_id}/transactions`).
    pub async fn batch_create(&self, account_id: &str, rows: Vec<NewTransactionRow>) -> Result<Vec<Transaction>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let account = self.accounts.get_by_id(account_id).await?;
        let balance = self.accounts.get_balance(account_id).await?;
        let computed = compute_chain(
            account_id,
            balance.available,
            &rows,
            account.account_type.allows_negative_balance(),
        )?;
        let final_available = computed
            .last()
            .map(|c| c.balance_after)
            .unwrap_or(balance.available);

        let persisted = self
            .transactions
            .insert_batch(account_id, computed, final_available)
            .await?;

        for (row, tx) in rows.iter().zip(persisted.iter()) {
            if let Some(kind) = row.capital_gain_kind {
                self.capital_gains
                    .create(&CapitalGain {
                        id: Uuid::new_v4().to_string(),
                        transaction_id: tx.id.clone(),
                        account_id: account_id.to_string(),
                        kind,
                    })
                    .await?;
            }
        }
        Ok(persisted)
    }

    /// Batch-updates recompute `balance_before/after` for the affected
    /// account from the first changed row forward (spec §4.6).
    pub async fn batch_update_amounts(
        &self,
        account_id: &str,
        updates: Vec<(String, Decimal)>,
    ) -> Result<()> {
        let account = self.accounts.get_by_id(account_id).await?;
        let Some(earliest) = updates.first() else {
            return Ok(());
        };
        let chain = self
            .transactions
            .list_for_account(account_id)
            .await?;
        let changed_ids: std::collections::HashSet<&str> =
            updates.iter().map(|(id, _)| id.as_str()).collect();
        let Some(first_changed) = chain.iter().find(|t| changed_ids.contains(t.id.as_str())) else {
            return Err(Error::NotFound("Transaction", earliest.0.clone()));
        };

        let starting = first_changed.balance_before;
        let amounts: std::collections::HashMap<&str, Decimal> =
            updates.iter().map(|(id, amt)| (id.as_str(), *amt)).collect();
        let from_idx = chain.iter().position(|t| t.id == first_changed.id).unwrap();

        let mut running = starting;
        for tx in &chain[from_idx..] {
            let amount = amounts.get(tx.id.as_str()).copied().unwrap_or(tx.amount);
            let balance_after = running + amount;
            if balance_after.is_sign_negative() && !account.account_type.allows_negative_balance() {
                return Err(ValidationError::NegativeBalance {
                    account_id: account_id.to_string(),
                }
                .into());
            }
            self.transactions.update_amount(&tx.id, amount).await?;
            running = balance_after;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn row(amount: Decimal) -> NewTransactionRow {
        NewTransactionRow {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            amount,
            description: "x".into(),
            category: None,
            balance_after: None,
            capital_gain_kind: None,
        }
    }

    #[test]
    fn cash_chain_scenario() {
        // spec §8 scenario 1: 1000 -200 => 800, then +50 => 850
        let rows = vec![row(dec!(-200)), row(dec!(50))];
        let computed = compute_chain("acct-a", dec!(1000), &rows, false).unwrap();
        assert_eq!(computed[0].balance_before, dec!(1000));
        assert_eq!(computed[0].balance_after, dec!(800));
        assert_eq!(computed[1].balance_before, dec!(800));
        assert_eq!(computed[1].balance_after, dec!(850));
    }

    #[test]
    fn rejects_negative_balance_on_non_credit() {
        let rows = vec![row(dec!(-2000))];
        let err = compute_chain("acct-a", dec!(1000), &rows, false).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::NegativeBalance { .. })));
    }

    #[test]
    fn credit_account_allows_negative_balance() {
        let rows = vec![row(dec!(-2000))];
        let computed = compute_chain("acct-a", dec!(1000), &rows, true).unwrap();
        assert_eq!(computed[0].balance_after, dec!(-1000));
    }

    #[test]
    fn balance_chain_invariant_holds_for_arbitrary_sequence() {
        let rows = vec![row(dec!(10)), row(dec!(-5)), row(dec!(3)), row(dec!(-1))];
        let computed = compute_chain("acct-a", dec!(0), &rows, true).unwrap();
        for i in 0..computed.len() - 1 {
            assert_eq!(computed[i].balance_after, computed[i + 1].balance_before);
        }
        for c in &computed {
            assert_eq!(c.balance_after, c.balance_before + c.amount);
        }
    }
}
