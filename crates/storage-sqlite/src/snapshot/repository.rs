use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::snapshot::model::{
    BrokerageAccountMonthlySnapshot, DepositAccountMonthlySnapshot, MetalHoldingMonthlySnapshot,
    RealEstateMonthlySnapshot,
};
use moneta_core::snapshot::traits::{
    BrokerageAccountSnapshotRepositoryTrait, DepositAccountSnapshotRepositoryTrait,
    MetalHoldingSnapshotRepositoryTrait, RealEstateSnapshotRepositoryTrait,
};

use super::model::{
    BrokerageAccountMonthlySnapshotDB, DepositAccountMonthlySnapshotDB, MetalHoldingMonthlySnapshotDB,
    RealEstateMonthlySnapshotDB,
};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{
    brokerage_account_monthly_snapshots, brokerage_accounts, deposit_account_monthly_snapshots, deposit_accounts,
    metal_holding_monthly_snapshots, metal_holdings, real_estate_monthly_snapshots, real_estates,
};

pub struct SqliteDepositAccountSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDepositAccountSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DepositAccountSnapshotRepositoryTrait for SqliteDepositAccountSnapshotRepository {
    async fn upsert(&self, snapshot: &DepositAccountMonthlySnapshot) -> Result<()> {
        let row = DepositAccountMonthlySnapshotDB::from(snapshot);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(deposit_account_monthly_snapshots::table)
                    .values(&row)
                    .on_conflict((deposit_account_monthly_snapshots::account_id, deposit_account_monthly_snapshots::month_key))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<DepositAccountMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = deposit_account_monthly_snapshots::table
            .inner_join(deposit_accounts::table)
            .filter(deposit_accounts::wallet_id.eq(wallet_id))
            .filter(deposit_account_monthly_snapshots::month_key.eq_any(month_keys))
            .select(DepositAccountMonthlySnapshotDB::as_select())
            .load::<DepositAccountMonthlySnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(DepositAccountMonthlySnapshot::from).collect())
    }
}

pub struct SqliteBrokerageAccountSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteBrokerageAccountSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BrokerageAccountSnapshotRepositoryTrait for SqliteBrokerageAccountSnapshotRepository {
    async fn upsert(&self, snapshot: &BrokerageAccountMonthlySnapshot) -> Result<()> {
        let row = BrokerageAccountMonthlySnapshotDB::from(snapshot);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(brokerage_account_monthly_snapshots::table)
                    .values(&row)
                    .on_conflict((
                        brokerage_account_monthly_snapshots::account_id,
                        brokerage_account_monthly_snapshots::month_key,
                    ))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<BrokerageAccountMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = brokerage_account_monthly_snapshots::table
            .inner_join(brokerage_accounts::table)
            .filter(brokerage_accounts::wallet_id.eq(wallet_id))
            .filter(brokerage_account_monthly_snapshots::month_key.eq_any(month_keys))
            .select(BrokerageAccountMonthlySnapshotDB::as_select())
            .load::<BrokerageAccountMonthlySnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BrokerageAccountMonthlySnapshot::from).collect())
    }
}

pub struct SqliteMetalHoldingSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteMetalHoldingSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MetalHoldingSnapshotRepositoryTrait for SqliteMetalHoldingSnapshotRepository {
    async fn upsert(&self, snapshot: &MetalHoldingMonthlySnapshot) -> Result<()> {
        let row = MetalHoldingMonthlySnapshotDB::from(snapshot);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(metal_holding_monthly_snapshots::table)
                    .values(&row)
                    .on_conflict((metal_holding_monthly_snapshots::holding_id, metal_holding_monthly_snapshots::month_key))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<MetalHoldingMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = metal_holding_monthly_snapshots::table
            .inner_join(metal_holdings::table)
            .filter(metal_holdings::wallet_id.eq(wallet_id))
            .filter(metal_holding_monthly_snapshots::month_key.eq_any(month_keys))
            .select(MetalHoldingMonthlySnapshotDB::as_select())
            .load::<MetalHoldingMonthlySnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(MetalHoldingMonthlySnapshot::from).collect())
    }
}

pub struct SqliteRealEstateSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteRealEstateSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RealEstateSnapshotRepositoryTrait for SqliteRealEstateSnapshotRepository {
    async fn upsert(&self, snapshot: &RealEstateMonthlySnapshot) -> Result<()> {
        let row = RealEstateMonthlySnapshotDB::from(snapshot);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(real_estate_monthly_snapshots::table)
                    .values(&row)
                    .on_conflict((real_estate_monthly_snapshots::real_estate_id, real_estate_monthly_snapshots::month_key))
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn list_for_wallet_months(
        &self,
        wallet_id: &str,
        month_keys: &[String],
    ) -> Result<Vec<RealEstateMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = real_estate_monthly_snapshots::table
            .inner_join(real_estates::table)
            .filter(real_estates::wallet_id.eq(wallet_id))
            .filter(real_estate_monthly_snapshots::month_key.eq_any(month_keys))
            .select(RealEstateMonthlySnapshotDB::as_select())
            .load::<RealEstateMonthlySnapshotDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(RealEstateMonthlySnapshot::from).collect())
    }
}
