use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::wallet::{NewWallet, Wallet, WalletRepositoryTrait};

use super::model::WalletDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::wallets;

pub struct SqliteWalletRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteWalletRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl WalletRepositoryTrait for SqliteWalletRepository {
    async fn create(&self, new_wallet: NewWallet) -> Result<Wallet> {
        new_wallet.validate()?;
        let base_ccy = new_wallet.base_ccy_or_default();
        let row = WalletDB {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new_wallet.user_id,
            name: new_wallet.name,
            base_ccy,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.writer
            .exec(move |conn| {
                diesel::insert_into(wallets::table).values(&row).execute(conn).into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn get_by_id(&self, wallet_id: &str) -> Result<Wallet> {
        let mut conn = get_connection(&self.pool)?;
        let row = wallets::table
            .select(WalletDB::as_select())
            .find(wallet_id)
            .first::<WalletDB>(&mut conn)
            .map_err(|e| not_found_or(e, "Wallet", wallet_id))?;
        Ok(row.into())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Wallet>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = wallets::table
            .select(WalletDB::as_select())
            .filter(wallets::user_id.eq(user_id))
            .order(wallets::created_at.asc())
            .load::<WalletDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Wallet::from).collect())
    }

    async fn delete(&self, wallet_id: &str) -> Result<()> {
        let id = wallet_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(wallets::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}
