use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::fx::{FxMonthlySnapshot, FxSnapshotRepositoryTrait};

use super::model::FxMonthlySnapshotDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::fx_monthly_snapshots;
use crate::utils::chunk_for_sqlite;

pub struct SqliteFxSnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteFxSnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FxSnapshotRepositoryTrait for SqliteFxSnapshotRepository {
    /// Overwrites the month's row deterministically (spec §4.4 "upsert
    /// semantics"): re-running the engine for the same month with the same
    /// rates yields a byte-identical row.
    async fn upsert(&self, snapshot: &FxMonthlySnapshot) -> Result<()> {
        let row = FxMonthlySnapshotDB::from(snapshot);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(fx_monthly_snapshots::table)
                    .values(&row)
                    .on_conflict(fx_monthly_snapshots::month_key)
                    .do_update()
                    .set(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }

    async fn get(&self, month_key: &str) -> Result<Option<FxMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let row = fx_monthly_snapshots::table
            .select(FxMonthlySnapshotDB::as_select())
            .find(month_key)
            .first::<FxMonthlySnapshotDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(row.map(FxMonthlySnapshot::from))
    }

    async fn get_many(&self, month_keys: &[String]) -> Result<Vec<FxMonthlySnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let mut out = Vec::with_capacity(month_keys.len());
        for chunk in chunk_for_sqlite(month_keys) {
            let rows = fx_monthly_snapshots::table
                .select(FxMonthlySnapshotDB::as_select())
                .filter(fx_monthly_snapshots::month_key.eq_any(chunk))
                .load::<FxMonthlySnapshotDB>(&mut conn)
                .into_core()?;
            out.extend(rows.into_iter().map(FxMonthlySnapshot::from));
        }
        Ok(out)
    }
}
