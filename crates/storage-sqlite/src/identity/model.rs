use chrono::NaiveDateTime;
use diesel::prelude::*;

use moneta_core::identity::{Bank, User};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self { id: db.id, email: db.email, username: db.username, is_active: db.is_active, created_at: db.created_at }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::banks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BankDB {
    pub id: String,
    pub name: String,
    pub short_code: String,
}

impl From<BankDB> for Bank {
    fn from(db: BankDB) -> Self {
        Self { id: db.id, name: db.name, short_code: db.short_code }
    }
}
