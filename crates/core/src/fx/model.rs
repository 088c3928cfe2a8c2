use chrono::NaiveDateTime;

use crate::money::RateTable;

/// A singleton-per-month captured rate table (spec §3). The Snapshot Engine
/// is the only writer; the Aggregator reads these to convert frozen monthly
/// rows without ever recomputing FX inside a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FxMonthlySnapshot {
    pub month_key: String,
    pub rates: RateTable,
    pub captured_at: NaiveDateTime,
}
