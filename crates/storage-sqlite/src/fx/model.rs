use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use moneta_core::fx::FxMonthlySnapshot;

use crate::utils::decimal_from_text;

/// The rate table is stored as a JSON object (`{"USD":"0.25",...}`) rather
/// than a side table, mirroring the teacher's `FxRepository`'s single-row
/// settings blobs — a month's table is always read/written as one unit, so
/// there is no query that needs it normalized.
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::fx_monthly_snapshots)]
#[diesel(primary_key(month_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FxMonthlySnapshotDB {
    pub month_key: String,
    pub rates_json: String,
    pub captured_at: NaiveDateTime,
}

impl From<FxMonthlySnapshotDB> for FxMonthlySnapshot {
    fn from(db: FxMonthlySnapshotDB) -> Self {
        let raw: HashMap<String, String> = serde_json::from_str(&db.rates_json).unwrap_or_else(|e| {
            log::error!("failed to parse fx_monthly_snapshots.rates_json for {}: {e}", db.month_key);
            HashMap::new()
        });
        let rates = raw.into_iter().map(|(ccy, v)| (ccy.clone(), decimal_from_text(&v, "fx_monthly_snapshots.rates_json"))).collect();
        Self { month_key: db.month_key, rates, captured_at: db.captured_at }
    }
}

impl From<&FxMonthlySnapshot> for FxMonthlySnapshotDB {
    fn from(domain: &FxMonthlySnapshot) -> Self {
        let raw: HashMap<String, String> = domain.rates.iter().map(|(ccy, rate)| (ccy.clone(), rate.to_string())).collect();
        Self {
            month_key: domain.month_key.clone(),
            rates_json: serde_json::to_string(&raw).expect("rate table serializes to JSON"),
            captured_at: domain.captured_at,
        }
    }
}
