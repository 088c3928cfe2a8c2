use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_CURRENCY;
use crate::errors::{Result, ValidationError};

/// Named container belonging to a `User` (spec §3). Owns every other
/// per-user entity; deleting it cascades through the whole tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub base_ccy: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWallet {
    pub user_id: String,
    pub name: String,
    pub base_ccy: Option<String>,
}

impl NewWallet {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("user_id").into());
        }
        Ok(())
    }

    pub fn base_ccy_or_default(&self) -> String {
        self.base_ccy
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string())
    }
}
