use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Frozen per-month `DepositAccount` balance, in the account's own currency
/// (spec §3, §4.4 step 2). Unique per `(account_id, month_key)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositAccountMonthlySnapshot {
    pub account_id: String,
    pub month_key: String,
    pub available: Decimal,
    pub currency: String,
}

/// Frozen per-month `BrokerageAccount` cash+stocks, converted into the
/// wallet's base currency at materialization time (spec §4.4 step 3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerageAccountMonthlySnapshot {
    pub account_id: String,
    pub month_key: String,
    pub cash: Decimal,
    pub stocks: Decimal,
    pub currency: String,
}

/// Frozen per-month `MetalHolding` value, in the source currency (quote
/// currency when a quote was available, else `cost_currency`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalHoldingMonthlySnapshot {
    pub holding_id: String,
    pub month_key: String,
    pub value: Decimal,
    pub currency: String,
}

/// Frozen per-month `RealEstate` value, in the matched price's currency (or
/// the purchase currency on fallback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstateMonthlySnapshot {
    pub real_estate_id: String,
    pub month_key: String,
    pub value: Decimal,
    pub currency: String,
}

/// Counts of rows touched by one [`crate::snapshot::engine::SnapshotEngine`]
/// run, returned to the caller for logging/diagnostics.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotSummary {
    pub deposit_accounts: usize,
    pub brokerage_accounts: usize,
    pub metal_holdings: usize,
    pub real_estates: usize,
}
