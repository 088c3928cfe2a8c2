use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Property on a wallet (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstate {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub property_type: String,
    pub country: String,
    pub city: String,
    pub area: Decimal,
    pub purchase_price: Decimal,
    pub purchase_currency: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRealEstate {
    pub wallet_id: String,
    pub name: String,
    pub property_type: String,
    pub country: String,
    pub city: String,
    pub area: Decimal,
    pub purchase_price: Decimal,
    pub purchase_currency: String,
}

impl NewRealEstate {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if self.area < Decimal::ZERO {
            return Err(ValidationError::InvalidInput("area must be >= 0".into()).into());
        }
        Ok(())
    }
}

/// Reference price per m² for a `(type, country?, city?, currency)` bucket
/// (spec §3). History is kept; newest `as_of` wins within a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstatePrice {
    pub id: String,
    pub property_type: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub currency: String,
    pub price_per_m2: Decimal,
    pub as_of: NaiveDate,
}
