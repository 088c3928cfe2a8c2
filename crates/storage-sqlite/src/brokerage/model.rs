use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use moneta_core::brokerage::{
    BrokerageAccount, BrokerageDepositLink, BrokerageEvent, BrokerageEventType, Holding, Instrument, InstrumentType,
};

use crate::utils::decimal_from_text;

fn instrument_type_from_text(s: &str) -> InstrumentType {
    match s {
        "ETF" => InstrumentType::Etf,
        "BOND" => InstrumentType::Bond,
        "FUND" => InstrumentType::Fund,
        "CRYPTO" => InstrumentType::Crypto,
        _ => InstrumentType::Stock,
    }
}

fn event_type_to_text(t: BrokerageEventType) -> &'static str {
    match t {
        BrokerageEventType::Buy => "BUY",
        BrokerageEventType::Sell => "SELL",
        BrokerageEventType::Div => "DIV",
        BrokerageEventType::Split => "SPLIT",
    }
}

fn event_type_from_text(s: &str) -> BrokerageEventType {
    match s {
        "SELL" => BrokerageEventType::Sell,
        "DIV" => BrokerageEventType::Div,
        "SPLIT" => BrokerageEventType::Split,
        _ => BrokerageEventType::Buy,
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::brokerage_accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BrokerageAccountDB {
    pub id: String,
    pub wallet_id: String,
    pub bank_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<BrokerageAccountDB> for BrokerageAccount {
    fn from(db: BrokerageAccountDB) -> Self {
        Self { id: db.id, wallet_id: db.wallet_id, bank_id: db.bank_id, name: db.name, created_at: db.created_at }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::brokerage_deposit_links)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BrokerageDepositLinkDB {
    pub id: String,
    pub brokerage_account_id: String,
    pub deposit_account_id: String,
    pub currency: String,
}

impl From<BrokerageDepositLinkDB> for BrokerageDepositLink {
    fn from(db: BrokerageDepositLinkDB) -> Self {
        Self {
            id: db.id,
            brokerage_account_id: db.brokerage_account_id,
            deposit_account_id: db.deposit_account_id,
            currency: db.currency,
        }
    }
}

impl From<BrokerageDepositLink> for BrokerageDepositLinkDB {
    fn from(domain: BrokerageDepositLink) -> Self {
        Self {
            id: domain.id,
            brokerage_account_id: domain.brokerage_account_id,
            deposit_account_id: domain.deposit_account_id,
            currency: domain.currency,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::instruments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InstrumentDB {
    pub id: String,
    pub symbol: String,
    pub instrument_type: String,
    pub reporting_currency: String,
    pub mic: Option<String>,
}

impl From<InstrumentDB> for Instrument {
    fn from(db: InstrumentDB) -> Self {
        Self {
            id: db.id,
            symbol: db.symbol,
            instrument_type: instrument_type_from_text(&db.instrument_type),
            reporting_currency: db.reporting_currency,
            mic: db.mic,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(primary_key(account_id, instrument_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub account_id: String,
    pub instrument_id: String,
    pub quantity: String,
    pub avg_cost: String,
}

impl From<HoldingDB> for Holding {
    fn from(db: HoldingDB) -> Self {
        Self {
            quantity: decimal_from_text(&db.quantity, "holdings.quantity"),
            avg_cost: decimal_from_text(&db.avg_cost, "holdings.avg_cost"),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::brokerage_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BrokerageEventDB {
    pub id: String,
    pub account_id: String,
    pub instrument_id: String,
    pub trade_at: NaiveDateTime,
    pub seq: i64,
    pub event_type: String,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub currency: Option<String>,
    pub split_ratio: Option<String>,
}

impl From<BrokerageEventDB> for BrokerageEvent {
    fn from(db: BrokerageEventDB) -> Self {
        Self {
            id: db.id,
            account_id: db.account_id,
            instrument_id: db.instrument_id,
            trade_at: db.trade_at,
            seq: db.seq,
            event_type: event_type_from_text(&db.event_type),
            quantity: db.quantity.map(|v| decimal_from_text(&v, "brokerage_events.quantity")),
            unit_price: db.unit_price.map(|v| decimal_from_text(&v, "brokerage_events.unit_price")),
            currency: db.currency,
            split_ratio: db.split_ratio.map(|v| decimal_from_text(&v, "brokerage_events.split_ratio")),
        }
    }
}

impl BrokerageEventDB {
    pub fn event_type_text(t: BrokerageEventType) -> &'static str {
        event_type_to_text(t)
    }
}

pub fn optional_decimal_text(d: Option<Decimal>) -> Option<String> {
    d.map(|v| v.to_string())
}
