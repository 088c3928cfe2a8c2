use diesel::prelude::*;

use moneta_core::misc::{Debt, RecurringExpense, UserNote, YearGoal};

use crate::utils::decimal_from_text;

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::debts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DebtDB {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub principal: String,
    pub currency: String,
    pub monthly_payment: String,
}

impl From<DebtDB> for Debt {
    fn from(db: DebtDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            name: db.name,
            principal: decimal_from_text(&db.principal, "debts.principal"),
            currency: db.currency,
            monthly_payment: decimal_from_text(&db.monthly_payment, "debts.monthly_payment"),
        }
    }
}

impl From<&Debt> for DebtDB {
    fn from(domain: &Debt) -> Self {
        Self {
            id: domain.id.clone(),
            wallet_id: domain.wallet_id.clone(),
            name: domain.name.clone(),
            principal: domain.principal.to_string(),
            currency: domain.currency.clone(),
            monthly_payment: domain.monthly_payment.to_string(),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::recurring_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RecurringExpenseDB {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub amount: String,
    pub currency: String,
    pub day_of_month: i32,
}

impl From<RecurringExpenseDB> for RecurringExpense {
    fn from(db: RecurringExpenseDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            name: db.name,
            amount: decimal_from_text(&db.amount, "recurring_expenses.amount"),
            currency: db.currency,
            day_of_month: db.day_of_month.max(0) as u32,
        }
    }
}

impl From<&RecurringExpense> for RecurringExpenseDB {
    fn from(domain: &RecurringExpense) -> Self {
        Self {
            id: domain.id.clone(),
            wallet_id: domain.wallet_id.clone(),
            name: domain.name.clone(),
            amount: domain.amount.to_string(),
            currency: domain.currency.clone(),
            day_of_month: domain.day_of_month as i32,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::year_goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct YearGoalDB {
    pub id: String,
    pub wallet_id: String,
    pub year: i32,
    pub name: String,
    pub target_amount: String,
    pub currency: String,
    pub current_amount: String,
}

impl From<YearGoalDB> for YearGoal {
    fn from(db: YearGoalDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            year: db.year,
            name: db.name,
            target_amount: decimal_from_text(&db.target_amount, "year_goals.target_amount"),
            currency: db.currency,
            current_amount: decimal_from_text(&db.current_amount, "year_goals.current_amount"),
        }
    }
}

impl From<&YearGoal> for YearGoalDB {
    fn from(domain: &YearGoal) -> Self {
        Self {
            id: domain.id.clone(),
            wallet_id: domain.wallet_id.clone(),
            year: domain.year,
            name: domain.name.clone(),
            target_amount: domain.target_amount.to_string(),
            currency: domain.currency.clone(),
            current_amount: domain.current_amount.to_string(),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::user_notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserNoteDB {
    pub id: String,
    pub user_id: String,
    pub body: String,
}

impl From<UserNoteDB> for UserNote {
    fn from(db: UserNoteDB) -> Self {
        Self { id: db.id, user_id: db.user_id, body: db.body }
    }
}

impl From<&UserNote> for UserNoteDB {
    fn from(domain: &UserNote) -> Self {
        Self { id: domain.id.clone(), user_id: domain.user_id.clone(), body: domain.body.clone() }
    }
}
