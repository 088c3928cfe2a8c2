use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::metals::{MetalHolding, MetalHoldingRepositoryTrait, NewMetalHolding};

use super::model::MetalHoldingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::metal_holdings;

pub struct SqliteMetalHoldingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteMetalHoldingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl MetalHoldingRepositoryTrait for SqliteMetalHoldingRepository {
    async fn create(&self, new_holding: NewMetalHolding) -> Result<MetalHolding> {
        new_holding.validate()?;
        let domain = MetalHolding {
            id: uuid::Uuid::new_v4().to_string(),
            wallet_id: new_holding.wallet_id,
            metal: new_holding.metal,
            grams: new_holding.grams,
            cost_basis: new_holding.cost_basis,
            cost_currency: new_holding.cost_currency,
            quote_symbol: new_holding.quote_symbol,
        };
        let row = MetalHoldingDB::from(&domain);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(metal_holdings::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(domain)
    }

    async fn get_by_id(&self, id: &str) -> Result<MetalHolding> {
        let mut conn = get_connection(&self.pool)?;
        let row = metal_holdings::table
            .select(MetalHoldingDB::as_select())
            .find(id)
            .first::<MetalHoldingDB>(&mut conn)
            .map_err(|e| not_found_or(e, "MetalHolding", id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<MetalHolding>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = metal_holdings::table
            .select(MetalHoldingDB::as_select())
            .filter(metal_holdings::wallet_id.eq(wallet_id))
            .load::<MetalHoldingDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(MetalHolding::from).collect())
    }

    /// `None` deletes the row: a metal sale that reduces `grams` to zero
    /// removes the holding rather than persisting a zero-quantity row
    /// (spec §3, §9 Open Question 2).
    async fn save_or_delete(&self, id: &str, updated: Option<MetalHolding>) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                match updated {
                    Some(holding) => {
                        let row = MetalHoldingDB::from(&holding);
                        diesel::update(metal_holdings::table.find(&id))
                            .set((
                                metal_holdings::grams.eq(&row.grams),
                                metal_holdings::cost_basis.eq(&row.cost_basis),
                            ))
                            .execute(conn)
                            .into_core()?;
                    }
                    None => {
                        diesel::delete(metal_holdings::table.find(&id)).execute(conn).into_core()?;
                    }
                }
                Ok(())
            })
            .await
    }
}
