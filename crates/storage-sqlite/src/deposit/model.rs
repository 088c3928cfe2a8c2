use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use moneta_core::deposit::{AccountType, CapitalGain, CapitalGainKind, DepositAccount, Transaction, TransactionStatus};

use crate::utils::decimal_from_text;

fn account_type_to_text(t: AccountType) -> &'static str {
    match t {
        AccountType::Current => "CURRENT",
        AccountType::Savings => "SAVINGS",
        AccountType::Brokerage => "BROKERAGE",
        AccountType::Credit => "CREDIT",
    }
}

fn account_type_from_text(s: &str) -> AccountType {
    match s {
        "SAVINGS" => AccountType::Savings,
        "BROKERAGE" => AccountType::Brokerage,
        "CREDIT" => AccountType::Credit,
        _ => AccountType::Current,
    }
}

fn status_to_text(s: TransactionStatus) -> &'static str {
    match s {
        TransactionStatus::Pending => "PENDING",
        TransactionStatus::Posted => "POSTED",
        TransactionStatus::Cancelled => "CANCELLED",
    }
}

fn status_from_text(s: &str) -> TransactionStatus {
    match s {
        "PENDING" => TransactionStatus::Pending,
        "CANCELLED" => TransactionStatus::Cancelled,
        _ => TransactionStatus::Posted,
    }
}

fn gain_kind_to_text(k: CapitalGainKind) -> &'static str {
    match k {
        CapitalGainKind::DepositInterest => "DEPOSIT_INTEREST",
        CapitalGainKind::BrokerRealizedPnl => "BROKER_REALIZED_PNL",
        CapitalGainKind::BrokerDividend => "BROKER_DIVIDEND",
        CapitalGainKind::MetalRealizedPnl => "METAL_REALIZED_PNL",
        CapitalGainKind::RealEstateRealizedPnl => "REAL_ESTATE_REALIZED_PNL",
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::deposit_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepositAccountDB {
    pub id: String,
    pub wallet_id: String,
    pub bank_id: String,
    pub name: String,
    pub account_type: String,
    pub currency: String,
    pub account_number_ciphertext: Vec<u8>,
    pub account_number_fingerprint: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<DepositAccountDB> for DepositAccount {
    fn from(db: DepositAccountDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            bank_id: db.bank_id,
            name: db.name,
            account_type: account_type_from_text(&db.account_type),
            currency: db.currency,
            account_number_ciphertext: db.account_number_ciphertext,
            account_number_fingerprint: db.account_number_fingerprint,
            is_active: db.is_active,
            created_at: db.created_at,
        }
    }
}

impl DepositAccountDB {
    pub fn account_type_text(t: AccountType) -> &'static str {
        account_type_to_text(t)
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: String,
    pub balance_before: String,
    pub balance_after: String,
    pub description: String,
    pub category: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            date: db.date,
            amount: decimal_from_text(&db.amount, "transactions.amount"),
            balance_before: decimal_from_text(&db.balance_before, "transactions.balance_before"),
            balance_after: decimal_from_text(&db.balance_after, "transactions.balance_after"),
            description: db.description,
            category: db.category,
            status: status_from_text(&db.status),
            created_at: db.created_at,
        }
    }
}

impl TransactionDB {
    pub fn status_text(s: TransactionStatus) -> &'static str {
        status_to_text(s)
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::capital_gains)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CapitalGainDB {
    pub id: String,
    pub transaction_id: String,
    pub account_id: String,
    pub kind: String,
}

impl From<&CapitalGain> for CapitalGainDB {
    fn from(domain: &CapitalGain) -> Self {
        Self {
            id: domain.id.clone(),
            transaction_id: domain.transaction_id.clone(),
            account_id: domain.account_id.clone(),
            kind: gain_kind_to_text(domain.kind).to_string(),
        }
    }
}
