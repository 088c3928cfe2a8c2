use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identity and profile, owned by the external session/auth service. The
/// wallet service only holds this as a foreign key target and enforces the
/// cascade-on-delete described in spec §3; full user CRUD is out of scope
/// here (spec §1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Catalog of institutions (spec §3). CRUD is out of scope; the wallet
/// service reads this as a lookup table referenced by `DepositAccount` and
/// `BrokerageAccount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bank {
    pub id: String,
    pub name: String,
    pub short_code: String,
}
