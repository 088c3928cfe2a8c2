use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use rust_decimal::Decimal;

use moneta_core::deposit::traits::ComputedTransaction;
use moneta_core::deposit::{
    CapitalGain, CapitalGainRepositoryTrait, DepositAccount, DepositAccountBalance, DepositAccountRepositoryTrait,
    NewDepositAccount, Transaction, TransactionRepositoryTrait, TransactionStatus,
};
use moneta_core::errors::Result;

use super::model::{CapitalGainDB, DepositAccountDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::{capital_gains, deposit_accounts, transactions};
use crate::utils::decimal_from_text;

pub struct SqliteDepositAccountRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDepositAccountRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DepositAccountRepositoryTrait for SqliteDepositAccountRepository {
    async fn create(&self, new_account: NewDepositAccount, fingerprint: String, ciphertext: Vec<u8>) -> Result<DepositAccount> {
        new_account.validate()?;
        let opening_balance = new_account.opening_balance.unwrap_or(Decimal::ZERO);
        let account_row = DepositAccountDB {
            id: uuid::Uuid::new_v4().to_string(),
            wallet_id: new_account.wallet_id,
            bank_id: new_account.bank_id,
            name: new_account.name,
            account_type: DepositAccountDB::account_type_text(new_account.account_type).to_string(),
            currency: new_account.currency.clone(),
            account_number_ciphertext: ciphertext,
            account_number_fingerprint: fingerprint,
            is_active: true,
            created_at: chrono::Utc::now().naive_utc(),
        };

        self.writer
            .exec(move |conn| {
                diesel::insert_into(deposit_accounts::table).values(&account_row).execute(conn).into_core()?;

                if !opening_balance.is_zero() {
                    let now = chrono::Utc::now();
                    let opening_row = TransactionDB {
                        id: uuid::Uuid::new_v4().to_string(),
                        account_id: account_row.id.clone(),
                        date: now.date_naive(),
                        amount: opening_balance.to_string(),
                        balance_before: Decimal::ZERO.to_string(),
                        balance_after: opening_balance.to_string(),
                        description: "Opening balance".to_string(),
                        category: None,
                        status: TransactionDB::status_text(TransactionStatus::Posted).to_string(),
                        created_at: now.naive_utc(),
                    };
                    diesel::insert_into(transactions::table).values(&opening_row).execute(conn).into_core()?;
                }

                Ok(account_row.into())
            })
            .await
    }

    async fn get_by_id(&self, account_id: &str) -> Result<DepositAccount> {
        let mut conn = get_connection(&self.pool)?;
        let row = deposit_accounts::table
            .select(DepositAccountDB::as_select())
            .find(account_id)
            .first::<DepositAccountDB>(&mut conn)
            .map_err(|e| not_found_or(e, "DepositAccount", account_id))?;
        Ok(row.into())
    }

    async fn get_balance(&self, account_id: &str) -> Result<DepositAccountBalance> {
        let mut conn = get_connection(&self.pool)?;
        let latest = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .select(TransactionDB::as_select())
            .order((transactions::date.desc(), transactions::created_at.desc()))
            .first::<TransactionDB>(&mut conn)
            .optional()
            .into_core()?;

        let available = latest.map(|t| decimal_from_text(&t.balance_after, "transactions.balance_after")).unwrap_or(Decimal::ZERO);
        Ok(DepositAccountBalance { account_id: account_id.to_string(), available, blocked: Decimal::ZERO })
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<DepositAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = deposit_accounts::table
            .select(DepositAccountDB::as_select())
            .filter(deposit_accounts::wallet_id.eq(wallet_id))
            .order(deposit_accounts::created_at.asc())
            .load::<DepositAccountDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(DepositAccount::from).collect())
    }

    async fn update_name(&self, account_id: &str, name: &str) -> Result<DepositAccount> {
        let id = account_id.to_string();
        let name = name.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(deposit_accounts::table.find(&id))
                    .set(deposit_accounts::name.eq(&name))
                    .execute(conn)
                    .into_core()?;
                let row = deposit_accounts::table
                    .select(DepositAccountDB::as_select())
                    .find(&id)
                    .first::<DepositAccountDB>(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, account_id: &str) -> Result<()> {
        let id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(deposit_accounts::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteTransactionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteTransactionRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl TransactionRepositoryTrait for SqliteTransactionRepository {
    async fn insert_batch(
        &self,
        account_id: &str,
        rows: Vec<ComputedTransaction>,
        _final_available: Decimal,
    ) -> Result<Vec<Transaction>> {
        let account_id = account_id.to_string();
        self.writer
            .exec(move |conn| {
                let now = chrono::Utc::now().naive_utc();
                let db_rows: Vec<TransactionDB> = rows
                    .into_iter()
                    .map(|r| TransactionDB {
                        id: uuid::Uuid::new_v4().to_string(),
                        account_id: account_id.clone(),
                        date: r.date,
                        amount: r.amount.to_string(),
                        balance_before: r.balance_before.to_string(),
                        balance_after: r.balance_after.to_string(),
                        description: r.description,
                        category: r.category,
                        status: TransactionDB::status_text(TransactionStatus::Posted).to_string(),
                        created_at: now,
                    })
                    .collect();

                diesel::insert_into(transactions::table).values(&db_rows).execute(conn).into_core()?;
                Ok(db_rows.into_iter().map(Transaction::from).collect())
            })
            .await
    }

    async fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .select(TransactionDB::as_select())
            .order((transactions::date.asc(), transactions::created_at.asc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn list_from_date(&self, account_id: &str, from_date: chrono::NaiveDate) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .filter(transactions::account_id.eq(account_id))
            .filter(transactions::date.ge(from_date))
            .select(TransactionDB::as_select())
            .order((transactions::date.asc(), transactions::created_at.asc()))
            .load::<TransactionDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn update_amount(&self, transaction_id: &str, amount: Decimal) -> Result<()> {
        let id = transaction_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::update(transactions::table.find(&id))
                    .set(transactions::amount.eq(amount.to_string()))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteCapitalGainRepository {
    writer: WriteHandle,
}

impl SqliteCapitalGainRepository {
    pub fn new(writer: WriteHandle) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl CapitalGainRepositoryTrait for SqliteCapitalGainRepository {
    async fn create(&self, capital_gain: &CapitalGain) -> Result<()> {
        let row = CapitalGainDB::from(capital_gain);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(capital_gains::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}
