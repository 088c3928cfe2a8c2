use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::brokerage::{
    BrokerageAccount, BrokerageAccountRepositoryTrait, BrokerageDepositLink, BrokerageDepositLinkRepositoryTrait,
    BrokerageEvent, BrokerageEventRepositoryTrait, Holding, HoldingRepositoryTrait, Instrument,
    InstrumentRepositoryTrait, NewBrokerageEvent,
};
use moneta_core::errors::Result;

use super::model::{optional_decimal_text, BrokerageAccountDB, BrokerageDepositLinkDB, BrokerageEventDB, HoldingDB, InstrumentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::{brokerage_accounts, brokerage_deposit_links, brokerage_events, holdings, instruments};

pub struct SqliteBrokerageAccountRepository {
    pool: Arc<DbPool>,
}

impl SqliteBrokerageAccountRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrokerageAccountRepositoryTrait for SqliteBrokerageAccountRepository {
    async fn get_by_id(&self, account_id: &str) -> Result<BrokerageAccount> {
        let mut conn = get_connection(&self.pool)?;
        let row = brokerage_accounts::table
            .select(BrokerageAccountDB::as_select())
            .find(account_id)
            .first::<BrokerageAccountDB>(&mut conn)
            .map_err(|e| not_found_or(e, "BrokerageAccount", account_id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<BrokerageAccount>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = brokerage_accounts::table
            .select(BrokerageAccountDB::as_select())
            .filter(brokerage_accounts::wallet_id.eq(wallet_id))
            .order(brokerage_accounts::created_at.asc())
            .load::<BrokerageAccountDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BrokerageAccount::from).collect())
    }
}

pub struct SqliteBrokerageDepositLinkRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteBrokerageDepositLinkRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BrokerageDepositLinkRepositoryTrait for SqliteBrokerageDepositLinkRepository {
    async fn create(&self, link: BrokerageDepositLink) -> Result<BrokerageDepositLink> {
        let mut row = BrokerageDepositLinkDB::from(link);
        row.id = uuid::Uuid::new_v4().to_string();
        self.writer
            .exec(move |conn| {
                diesel::insert_into(brokerage_deposit_links::table).values(&row).execute(conn).into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn list_for_brokerage(&self, brokerage_account_id: &str) -> Result<Vec<BrokerageDepositLink>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = brokerage_deposit_links::table
            .select(BrokerageDepositLinkDB::as_select())
            .filter(brokerage_deposit_links::brokerage_account_id.eq(brokerage_account_id))
            .load::<BrokerageDepositLinkDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BrokerageDepositLink::from).collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(brokerage_deposit_links::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteInstrumentRepository {
    pool: Arc<DbPool>,
}

impl SqliteInstrumentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InstrumentRepositoryTrait for SqliteInstrumentRepository {
    async fn get_by_id(&self, instrument_id: &str) -> Result<Instrument> {
        let mut conn = get_connection(&self.pool)?;
        let row = instruments::table
            .select(InstrumentDB::as_select())
            .find(instrument_id)
            .first::<InstrumentDB>(&mut conn)
            .map_err(|e| not_found_or(e, "Instrument", instrument_id))?;
        Ok(row.into())
    }
}

pub struct SqliteBrokerageEventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteBrokerageEventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BrokerageEventRepositoryTrait for SqliteBrokerageEventRepository {
    async fn insert(&self, event: NewBrokerageEvent, seq: i64) -> Result<BrokerageEvent> {
        let row = BrokerageEventDB {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: event.account_id,
            instrument_id: event.instrument_id,
            trade_at: event.trade_at,
            seq,
            event_type: BrokerageEventDB::event_type_text(event.event_type).to_string(),
            quantity: optional_decimal_text(event.quantity),
            unit_price: optional_decimal_text(event.unit_price),
            currency: event.currency,
            split_ratio: optional_decimal_text(event.split_ratio),
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(brokerage_events::table).values(&row).execute(conn).into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, event_id: &str) -> Result<BrokerageEvent> {
        let id = event_id.to_string();
        self.writer
            .exec(move |conn| {
                let row = brokerage_events::table
                    .select(BrokerageEventDB::as_select())
                    .find(&id)
                    .first::<BrokerageEventDB>(conn)
                    .into_core()?;
                diesel::delete(brokerage_events::table.find(&id)).execute(conn).into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn list_for_position(&self, account_id: &str, instrument_id: &str) -> Result<Vec<BrokerageEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = brokerage_events::table
            .select(BrokerageEventDB::as_select())
            .filter(brokerage_events::account_id.eq(account_id))
            .filter(brokerage_events::instrument_id.eq(instrument_id))
            .load::<BrokerageEventDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BrokerageEvent::from).collect())
    }

    async fn list_for_account(&self, account_id: &str) -> Result<Vec<BrokerageEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = brokerage_events::table
            .select(BrokerageEventDB::as_select())
            .filter(brokerage_events::account_id.eq(account_id))
            .load::<BrokerageEventDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(BrokerageEvent::from).collect())
    }

    async fn next_seq(&self, account_id: &str, instrument_id: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let max_seq: Option<i64> = brokerage_events::table
            .filter(brokerage_events::account_id.eq(account_id))
            .filter(brokerage_events::instrument_id.eq(instrument_id))
            .select(diesel::dsl::max(brokerage_events::seq))
            .first(&mut conn)
            .into_core()?;
        Ok(max_seq.map(|s| s + 1).unwrap_or(0))
    }
}

pub struct SqliteHoldingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteHoldingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl HoldingRepositoryTrait for SqliteHoldingRepository {
    async fn upsert(&self, account_id: &str, instrument_id: &str, holding: Holding) -> Result<()> {
        let account_id = account_id.to_string();
        let instrument_id = instrument_id.to_string();
        self.writer
            .exec(move |conn| {
                let row = HoldingDB {
                    account_id: account_id.clone(),
                    instrument_id: instrument_id.clone(),
                    quantity: holding.quantity.to_string(),
                    avg_cost: holding.avg_cost.to_string(),
                };
                let updated = diesel::update(holdings::table.find((&account_id, &instrument_id)))
                    .set((holdings::quantity.eq(&row.quantity), holdings::avg_cost.eq(&row.avg_cost)))
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    diesel::insert_into(holdings::table).values(&row).execute(conn).into_core()?;
                }
                Ok(())
            })
            .await
    }

    async fn get(&self, account_id: &str, instrument_id: &str) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let row = holdings::table
            .select(HoldingDB::as_select())
            .find((account_id, instrument_id))
            .first::<HoldingDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(Holding::from))
    }

    async fn list_for_account(&self, account_id: &str) -> Result<Vec<(String, Holding)>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = holdings::table
            .select(HoldingDB::as_select())
            .filter(holdings::account_id.eq(account_id))
            .load::<HoldingDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(|r| (r.instrument_id.clone(), Holding::from(r))).collect())
    }
}
