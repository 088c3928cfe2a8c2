use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use moneta_core::errors::Result;
use moneta_core::misc::{
    Debt, DebtRepositoryTrait, RecurringExpense, RecurringExpenseRepositoryTrait, UserNote,
    UserNoteRepositoryTrait, YearGoal, YearGoalRepositoryTrait,
};

use super::model::{DebtDB, RecurringExpenseDB, UserNoteDB, YearGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{not_found_or, IntoCore};
use crate::schema::{debts, recurring_expenses, user_notes, year_goals};

pub struct SqliteDebtRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteDebtRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl DebtRepositoryTrait for SqliteDebtRepository {
    async fn create(&self, debt: Debt) -> Result<Debt> {
        let row = DebtDB::from(&debt);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(debts::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(debt)
    }

    async fn get_by_id(&self, id: &str) -> Result<Debt> {
        let mut conn = get_connection(&self.pool)?;
        let row = debts::table
            .select(DebtDB::as_select())
            .find(id)
            .first::<DebtDB>(&mut conn)
            .map_err(|e| not_found_or(e, "Debt", id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<Debt>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = debts::table
            .select(DebtDB::as_select())
            .filter(debts::wallet_id.eq(wallet_id))
            .load::<DebtDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Debt::from).collect())
    }

    async fn update(&self, debt: Debt) -> Result<Debt> {
        let row = DebtDB::from(&debt);
        self.writer
            .exec(move |conn| {
                diesel::update(debts::table.find(&row.id)).set(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(debt)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(debts::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteRecurringExpenseRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteRecurringExpenseRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl RecurringExpenseRepositoryTrait for SqliteRecurringExpenseRepository {
    async fn create(&self, expense: RecurringExpense) -> Result<RecurringExpense> {
        let row = RecurringExpenseDB::from(&expense);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(recurring_expenses::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(expense)
    }

    async fn get_by_id(&self, id: &str) -> Result<RecurringExpense> {
        let mut conn = get_connection(&self.pool)?;
        let row = recurring_expenses::table
            .select(RecurringExpenseDB::as_select())
            .find(id)
            .first::<RecurringExpenseDB>(&mut conn)
            .map_err(|e| not_found_or(e, "RecurringExpense", id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str) -> Result<Vec<RecurringExpense>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = recurring_expenses::table
            .select(RecurringExpenseDB::as_select())
            .filter(recurring_expenses::wallet_id.eq(wallet_id))
            .load::<RecurringExpenseDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(RecurringExpense::from).collect())
    }

    async fn update(&self, expense: RecurringExpense) -> Result<RecurringExpense> {
        let row = RecurringExpenseDB::from(&expense);
        self.writer
            .exec(move |conn| {
                diesel::update(recurring_expenses::table.find(&row.id)).set(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(expense)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(recurring_expenses::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteYearGoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteYearGoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl YearGoalRepositoryTrait for SqliteYearGoalRepository {
    async fn create(&self, goal: YearGoal) -> Result<YearGoal> {
        let row = YearGoalDB::from(&goal);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(year_goals::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(goal)
    }

    async fn get_by_id(&self, id: &str) -> Result<YearGoal> {
        let mut conn = get_connection(&self.pool)?;
        let row = year_goals::table
            .select(YearGoalDB::as_select())
            .find(id)
            .first::<YearGoalDB>(&mut conn)
            .map_err(|e| not_found_or(e, "YearGoal", id))?;
        Ok(row.into())
    }

    async fn list_for_wallet(&self, wallet_id: &str, year: i32) -> Result<Vec<YearGoal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = year_goals::table
            .select(YearGoalDB::as_select())
            .filter(year_goals::wallet_id.eq(wallet_id))
            .filter(year_goals::year.eq(year))
            .load::<YearGoalDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(YearGoal::from).collect())
    }

    async fn update(&self, goal: YearGoal) -> Result<YearGoal> {
        let row = YearGoalDB::from(&goal);
        self.writer
            .exec(move |conn| {
                diesel::update(year_goals::table.find(&row.id)).set(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(goal)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(year_goals::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}

pub struct SqliteUserNoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SqliteUserNoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserNoteRepositoryTrait for SqliteUserNoteRepository {
    async fn create(&self, note: UserNote) -> Result<UserNote> {
        let row = UserNoteDB::from(&note);
        self.writer
            .exec(move |conn| {
                diesel::insert_into(user_notes::table).values(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(note)
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<UserNote>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = user_notes::table
            .select(UserNoteDB::as_select())
            .filter(user_notes::user_id.eq(user_id))
            .load::<UserNoteDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(UserNote::from).collect())
    }

    async fn update(&self, note: UserNote) -> Result<UserNote> {
        let row = UserNoteDB::from(&note);
        self.writer
            .exec(move |conn| {
                diesel::update(user_notes::table.find(&row.id)).set(&row).execute(conn).into_core()?;
                Ok(())
            })
            .await?;
        Ok(note)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(user_notes::table.find(&id)).execute(conn).into_core()?;
                Ok(())
            })
            .await
    }
}
