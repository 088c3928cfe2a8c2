use chrono::NaiveDate;
use diesel::prelude::*;

use moneta_core::real_estate::{RealEstate, RealEstatePrice};

use crate::utils::decimal_from_text;

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::real_estates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealEstateDB {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub property_type: String,
    pub country: String,
    pub city: String,
    pub area: String,
    pub purchase_price: String,
    pub purchase_currency: String,
}

impl From<RealEstateDB> for RealEstate {
    fn from(db: RealEstateDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            name: db.name,
            property_type: db.property_type,
            country: db.country,
            city: db.city,
            area: decimal_from_text(&db.area, "real_estates.area"),
            purchase_price: decimal_from_text(&db.purchase_price, "real_estates.purchase_price"),
            purchase_currency: db.purchase_currency,
        }
    }
}

impl From<&RealEstate> for RealEstateDB {
    fn from(domain: &RealEstate) -> Self {
        Self {
            id: domain.id.clone(),
            wallet_id: domain.wallet_id.clone(),
            name: domain.name.clone(),
            property_type: domain.property_type.clone(),
            country: domain.country.clone(),
            city: domain.city.clone(),
            area: domain.area.to_string(),
            purchase_price: domain.purchase_price.to_string(),
            purchase_currency: domain.purchase_currency.clone(),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::real_estate_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RealEstatePriceDB {
    pub id: String,
    pub property_type: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub currency: String,
    pub price_per_m2: String,
    pub as_of: NaiveDate,
}

impl From<RealEstatePriceDB> for RealEstatePrice {
    fn from(db: RealEstatePriceDB) -> Self {
        Self {
            id: db.id,
            property_type: db.property_type,
            country: db.country,
            city: db.city,
            currency: db.currency,
            price_per_m2: decimal_from_text(&db.price_per_m2, "real_estate_prices.price_per_m2"),
            as_of: db.as_of,
        }
    }
}

impl From<&RealEstatePrice> for RealEstatePriceDB {
    fn from(domain: &RealEstatePrice) -> Self {
        Self {
            id: domain.id.clone(),
            property_type: domain.property_type.clone(),
            country: domain.country.clone(),
            city: domain.city.clone(),
            currency: domain.currency.clone(),
            price_per_m2: domain.price_per_m2.to_string(),
            as_of: domain.as_of,
        }
    }
}
