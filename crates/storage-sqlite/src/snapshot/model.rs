use diesel::prelude::*;

use moneta_core::snapshot::model::{
    BrokerageAccountMonthlySnapshot, DepositAccountMonthlySnapshot, MetalHoldingMonthlySnapshot,
    RealEstateMonthlySnapshot,
};

use crate::utils::decimal_from_text;

#[derive(Queryable, Selectable, Insertable, AsChangeset, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::deposit_account_monthly_snapshots)]
#[diesel(primary_key(account_id, month_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DepositAccountMonthlySnapshotDB {
    pub account_id: String,
    pub month_key: String,
    pub available: String,
    pub currency: String,
}

impl From<DepositAccountMonthlySnapshotDB> for DepositAccountMonthlySnapshot {
    fn from(db: DepositAccountMonthlySnapshotDB) -> Self {
        Self {
            account_id: db.account_id,
            month_key: db.month_key,
            available: decimal_from_text(&db.available, "deposit_account_monthly_snapshots.available"),
            currency: db.currency,
        }
    }
}

impl From<&DepositAccountMonthlySnapshot> for DepositAccountMonthlySnapshotDB {
    fn from(domain: &DepositAccountMonthlySnapshot) -> Self {
        Self {
            account_id: domain.account_id.clone(),
            month_key: domain.month_key.clone(),
            available: domain.available.to_string(),
            currency: domain.currency.clone(),
        }
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::brokerage_account_monthly_snapshots)]
#[diesel(primary_key(account_id, month_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BrokerageAccountMonthlySnapshotDB {
    pub account_id: String,
    pub month_key: String,
    pub cash: String,
    pub stocks: String,
    pub currency: String,
}

impl From<BrokerageAccountMonthlySnapshotDB> for BrokerageAccountMonthlySnapshot {
    fn from(db: BrokerageAccountMonthlySnapshotDB) -> Self {
        Self {
            account_id: db.account_id,
            month_key: db.month_key,
            cash: decimal_from_text(&db.cash, "brokerage_account_monthly_snapshots.cash"),
            stocks: decimal_from_text(&db.stocks, "brokerage_account_monthly_snapshots.stocks"),
            currency: db.currency,
        }
    }
}

impl From<&BrokerageAccountMonthlySnapshot> for BrokerageAccountMonthlySnapshotDB {
    fn from(domain: &BrokerageAccountMonthlySnapshot) -> Self {
        Self {
            account_id: domain.account_id.clone(),
            month_key: domain.month_key.clone(),
            cash: domain.cash.to_string(),
            stocks: domain.stocks.to_string(),
            currency: domain.currency.clone(),
        }
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::metal_holding_monthly_snapshots)]
#[diesel(primary_key(holding_id, month_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MetalHoldingMonthlySnapshotDB {
    pub holding_id: String,
    pub month_key: String,
    pub value: String,
    pub currency: String,
}

impl From<MetalHoldingMonthlySnapshotDB> for MetalHoldingMonthlySnapshot {
    fn from(db: MetalHoldingMonthlySnapshotDB) -> Self {
        Self {
            holding_id: db.holding_id,
            month_key: db.month_key,
            value: decimal_from_text(&db.value, "metal_holding_monthly_snapshots.value"),
            currency: db.currency,
        }
    }
}

impl From<&MetalHoldingMonthlySnapshot> for MetalHoldingMonthlySnapshotDB {
    fn from(domain: &MetalHoldingMonthlySnapshot) -> Self {
        Self {
            holding_id: domain.holding_id.clone(),
            month_key: domain.month_key.clone(),
            value: domain.value.to_string(),
            currency: domain.currency.clone(),
        }
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::real_estate_monthly_snapshots)]
#[diesel(primary_key(real_estate_id, month_key))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealEstateMonthlySnapshotDB {
    pub real_estate_id: String,
    pub month_key: String,
    pub value: String,
    pub currency: String,
}

impl From<RealEstateMonthlySnapshotDB> for RealEstateMonthlySnapshot {
    fn from(db: RealEstateMonthlySnapshotDB) -> Self {
        Self {
            real_estate_id: db.real_estate_id,
            month_key: db.month_key,
            value: decimal_from_text(&db.value, "real_estate_monthly_snapshots.value"),
            currency: db.currency,
        }
    }
}

impl From<&RealEstateMonthlySnapshot> for RealEstateMonthlySnapshotDB {
    fn from(domain: &RealEstateMonthlySnapshot) -> Self {
        Self {
            real_estate_id: domain.real_estate_id.clone(),
            month_key: domain.month_key.clone(),
            value: domain.value.to_string(),
            currency: domain.currency.clone(),
        }
    }
}
