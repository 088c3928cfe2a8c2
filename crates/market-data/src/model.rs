use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a quote originated. The wallet service never cares how the quote was
/// produced, only that it exists; this is carried through for display/audit only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    Provider,
    Manual,
    Cached,
}

/// A single latest-price observation for a tradable symbol, as served by the
/// market-data service's batch endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub currency: String,
    pub as_of: NaiveDateTime,
    pub source: DataSource,
}
