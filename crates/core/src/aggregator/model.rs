use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::RateTable;
use crate::valuation::Health;

/// One month's frozen breakdown, in the wallet's base currency (spec §6.2).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBreakdown {
    pub ccy: String,
    pub cash_deposit: Decimal,
    pub cash_broker: Decimal,
    pub stocks: Decimal,
    pub metals: Decimal,
    pub real_estate: Decimal,
    pub total: Decimal,
    /// `(current - previous) / previous`, absent for the oldest month in the
    /// window or when the previous month has no value (Glossary "MoM").
    pub mom: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccountSnapshotEntry {
    pub ccy: String,
    pub available: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccountSection {
    pub id: String,
    pub name: String,
    pub ccy: String,
    pub available: Decimal,
    /// Average transactions booked per month across the snapshot window
    /// (spec §6.2).
    pub tx_per_month: Decimal,
    pub health: Health,
    pub snapshots: HashMap<String, DepositAccountSnapshotEntry>,
    pub pct_of_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashAccountRef {
    pub deposit_account_id: String,
    pub name: String,
    pub ccy: String,
    pub available: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    pub symbol: String,
    /// Market Identifier Code of the instrument's primary listing venue,
    /// absent for catalog rows seeded before the venue was known.
    pub mic: Option<String>,
    pub value: Decimal,
    pub value_default_ccy: Option<Decimal>,
    pub pnl_pct: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageAccountSnapshotEntry {
    pub ccy: String,
    pub cash: Decimal,
    pub stocks: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageAccountSection {
    pub id: String,
    pub name: String,
    pub ccy: String,
    pub cash_accounts: Vec<CashAccountRef>,
    pub sum_cash_accounts: Decimal,
    pub positions: Vec<PositionView>,
    pub positions_count: usize,
    pub positions_value: Decimal,
    /// Average brokerage events recorded per month across the snapshot
    /// window (spec §6.2).
    pub events_per_month: Decimal,
    pub health: Health,
    pub snapshots: HashMap<String, BrokerageAccountSnapshotEntry>,
    pub pct_of_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalItemView {
    pub name: String,
    pub quantity: Decimal,
    pub qty_unit: &'static str,
    pub value: Decimal,
    pub ccy: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalsSection {
    pub count: usize,
    pub value: Decimal,
    pub ccy: String,
    pub items: Vec<MetalItemView>,
    pub health: Health,
    pub pct_of_total: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateItemView {
    pub name: String,
    pub city: String,
    pub value: Decimal,
    pub ccy: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateSection {
    pub count: usize,
    pub value: Decimal,
    pub ccy: String,
    pub items: Vec<RealEstateItemView>,
    pub health: Health,
    pub pct_of_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletHealth {
    pub needs_review: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletTree {
    pub id: String,
    pub name: String,
    pub base_ccy: String,
    pub health: WalletHealth,
    pub deposit_accounts: Vec<DepositAccountSection>,
    pub brokerage_accounts: Vec<BrokerageAccountSection>,
    pub metals: MetalsSection,
    pub real_estate: RealEstateSection,
    /// Months whose FX snapshot row is missing are omitted entirely rather
    /// than imputed (spec §4.5, §8 "missing-rate contract").
    pub snapshots: HashMap<String, MonthBreakdown>,
    pub fx_by_month: HashMap<String, RateTable>,
}
