use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Current,
    Savings,
    Brokerage,
    Credit,
}

impl AccountType {
    /// Only CREDIT accounts may carry a negative `available` balance (spec §4.6).
    pub fn allows_negative_balance(self) -> bool {
        matches!(self, AccountType::Credit)
    }
}

/// Cash account attached to a wallet and bank (spec §3). The account number
/// is never stored in the clear: `account_number_ciphertext` is decryptable
/// only with the server's encryption key, and `account_number_fingerprint`
/// is a keyed hash used for constant-time equality lookups without
/// decrypting (spec §9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccount {
    pub id: String,
    pub wallet_id: String,
    pub bank_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub account_number_ciphertext: Vec<u8>,
    pub account_number_fingerprint: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositAccountBalance {
    pub account_id: String,
    pub available: Decimal,
    pub blocked: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDepositAccount {
    pub wallet_id: String,
    pub bank_id: String,
    pub name: String,
    pub account_type: AccountType,
    pub currency: String,
    pub account_number: String,
    pub opening_balance: Option<Decimal>,
}

impl NewDepositAccount {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingField("currency").into());
        }
        if self.account_number.trim().is_empty() {
            return Err(ValidationError::MissingField("account_number").into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Posted,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapitalGainKind {
    DepositInterest,
    BrokerRealizedPnl,
    BrokerDividend,
    MetalRealizedPnl,
    RealEstateRealizedPnl,
}

/// Cash movement on a `DepositAccount` (spec §3, §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub balance_before: Decimal,
    pub balance_after: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

/// One row of an incoming batch-create request (spec §4.6). `balance_after`
/// may be supplied by the caller as a sanity check; when absent it is
/// computed by the [`crate::deposit::service::TransactionService`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRow {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub description: String,
    pub category: Option<String>,
    pub balance_after: Option<Decimal>,
    pub capital_gain_kind: Option<CapitalGainKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGain {
    pub id: String,
    pub transaction_id: String,
    pub account_id: String,
    pub kind: CapitalGainKind,
}
