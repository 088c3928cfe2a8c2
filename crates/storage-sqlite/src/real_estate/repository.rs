use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::real_estate::{
    NewRealEstate, RealEstate, RealEstatePrice, RealEstatePriceRepositoryTrait, RealEstateRepositoryTrait,
};

use super::model::{RealEstateDB, RealEstatePriceDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::{real_estate_prices, real_estates};

pub struct SqliteRealEstateRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteRealEstateRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RealEstateRepositoryTrait for SqliteRealEstateRepository {
    async fn create(&self, new_re: NewRealEstate) -> Result<RealEstate> {
        new_re.validate()?;
        let domain = RealEstate {
            id: uuid::Uuid::new_v4().to_string(),
            wallet_id: new_re.wallet_id,
            name: new_re.name,
            property_type: new_re.property_type,
            country: new_re.country,
            city: new_re.city,
            area: new_re.area,
            purchase_price: new_re.purchase_price,
            purchase_currency: new_re.purchase_currency,
        };
        let row = RealEstateDB::from(&domain);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(real_estates::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(domain)
    }

    async fn get_by_id(&self, id: &str) -> Result<RealEstate> {
        let mut conn = get_connection(&self.pool)?;
        let row = real_estates::table
            .select(RealEstateDB::as_select())
            .find(id)
            .first::<RealEstateDB>(&mut conn)
            .map_err(|e| not_found_or(e, "RealEstate", id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<RealEstate>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = real_estates::table
            .select(RealEstateDB::as_select())
            .filter(real_estates::wallet_id.eq(wallet_id))
            .load::<RealEstateDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(RealEstate::from).collect())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(real_estates::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteRealEstatePriceRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteRealEstatePriceRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RealEstatePriceRepositoryTrait for SqliteRealEstatePriceRepository {
    async fn list_for_type(&self, property_type: &str) -> Result<Vec<RealEstatePrice>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = real_estate_prices::table
            .select(RealEstatePriceDB::as_select())
            .filter(real_estate_prices::property_type.eq(property_type))
            .order(real_estate_prices::as_of.desc())
            .load::<RealEstatePriceDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(RealEstatePrice::from).collect())
    }

    async fn add(&self, price: RealEstatePrice) -> Result<()> {
        let row = RealEstatePriceDB::from(&price);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(real_estate_prices::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}
