use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::identity::{Bank, BankRepositoryTrait, User, UserRepositoryTrait};

use super::model::{BankDB, UserDB};
use crate::db::{get_connection, DbPool};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::{banks, users};

pub struct SqliteUserRepository {
    pool: Arc<DbPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for SqliteUserRepository {
    async fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(|e| not_found_or(e, "User", user_id))?;
        Ok(row.into())
    }
}

pub struct SqliteBankRepository {
    pool: Arc<DbPool>,
}

impl SqliteBankRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BankRepositoryTrait for SqliteBankRepository {
    async fn get_by_id(&self, bank_id: &str) -> Result<Bank> {
        let mut conn = get_connection(&self.pool)?;
        let row = banks::table
            .select(BankDB::as_select())
            .find(bank_id)
            .first::<BankDB>(&mut conn)
            .map_err(|e| not_found_or(e, "Bank", bank_id))?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Bank>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = banks::table.select(BankDB::as_select()).order(banks::name.asc()).load::<BankDB>(&mut conn).into_core()?;
        Ok(rows.into_iter().map(Bank::from).collect())
    }
}
