use chrono::{NaiveDateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Broker-side account attached to a wallet and bank (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageAccount {
    pub id: String,
    pub wallet_id: String,
    pub bank_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Link from a `BrokerageAccount` to one of its cash lines. Spec §3: "at
/// most one link per (brokerage, currency)".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageDepositLink {
    pub id: String,
    pub brokerage_account_id: String,
    pub deposit_account_id: String,
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentType {
    Stock,
    Etf,
    Bond,
    Fund,
    Crypto,
}

/// Catalog of tradable symbols (spec §3); symbol unique globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub symbol: String,
    pub instrument_type: InstrumentType,
    pub reporting_currency: String,
    /// Market Identifier Code (ISO 10383) of the instrument's primary
    /// listing venue; absent for catalog rows seeded before the venue was
    /// known.
    pub mic: Option<String>,
}

/// Position held by a `BrokerageAccount` in an `Instrument` (spec §3).
/// Derived solely from the event stream — never written to directly outside
/// [`crate::brokerage::service::BrokerageService`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub quantity: Decimal,
    pub avg_cost: Decimal,
}

impl Default for Holding {
    fn default() -> Self {
        Holding {
            quantity: Decimal::ZERO,
            avg_cost: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BrokerageEventType {
    Buy,
    Sell,
    Div,
    Split,
}

/// Immutable (or admin-editable) fact describing a BUY/SELL/DIV/SPLIT (spec
/// §3, §4.2). Events for the same `(account_id, instrument_id)` are totally
/// ordered by `trade_at`, ties broken by `seq` (insertion order — spec §4.2
/// "ties broken by creation id").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageEvent {
    pub id: String,
    pub account_id: String,
    pub instrument_id: String,
    pub trade_at: NaiveDateTime,
    pub seq: i64,
    pub event_type: BrokerageEventType,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub currency: Option<String>,
    pub split_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrokerageEvent {
    pub account_id: String,
    pub instrument_id: String,
    pub trade_at: NaiveDateTime,
    pub event_type: BrokerageEventType,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub currency: Option<String>,
    pub split_ratio: Option<Decimal>,
}

impl NewBrokerageEvent {
    pub fn validate(&self) -> Result<()> {
        match self.event_type {
            BrokerageEventType::Buy | BrokerageEventType::Sell => {
                if self.quantity.is_none() || self.unit_price.is_none() || self.currency.is_none() {
                    return Err(ValidationError::InvalidInput(
                        "BUY/SELL require quantity, unit_price and currency".into(),
                    )
                    .into());
                }
            }
            BrokerageEventType::Div => {
                if self.unit_price.is_none() || self.currency.is_none() {
                    return Err(ValidationError::InvalidInput(
                        "DIV requires amount (unit_price) and currency".into(),
                    )
                    .into());
                }
            }
            BrokerageEventType::Split => {
                if self.split_ratio.is_none() {
                    return Err(ValidationError::InvalidInput(
                        "SPLIT requires split_ratio".into(),
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    pub fn trade_date(&self) -> NaiveDate {
        self.trade_at.date()
    }
}
