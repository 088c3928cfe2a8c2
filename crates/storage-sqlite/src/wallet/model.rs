use chrono::NaiveDateTime;
use diesel::prelude::*;

use moneta_core::wallet::Wallet;

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WalletDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub base_ccy: String,
    pub created_at: NaiveDateTime,
}

impl From<WalletDB> for Wallet {
    fn from(db: WalletDB) -> Self {
        Self { id: db.id, user_id: db.user_id, name: db.name, base_ccy: db.base_ccy, created_at: db.created_at }
    }
}
