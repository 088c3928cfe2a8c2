use diesel::prelude::*;

use moneta_core::metals::MetalHolding;

use crate::utils::decimal_from_text;

#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::metal_holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MetalHoldingDB {
    pub id: String,
    pub wallet_id: String,
    pub metal: String,
    pub grams: String,
    pub cost_basis: String,
    pub cost_currency: String,
    pub quote_symbol: String,
}

impl From<MetalHoldingDB> for MetalHolding {
    fn from(db: MetalHoldingDB) -> Self {
        Self {
            id: db.id,
            wallet_id: db.wallet_id,
            metal: db.metal,
            grams: decimal_from_text(&db.grams, "metal_holdings.grams"),
            cost_basis: decimal_from_text(&db.cost_basis, "metal_holdings.cost_basis"),
            cost_currency: db.cost_currency,
            quote_symbol: db.quote_symbol,
        }
    }
}

impl From<&MetalHolding> for MetalHoldingDB {
    fn from(domain: &MetalHolding) -> Self {
        Self {
            id: domain.id.clone(),
            wallet_id: domain.wallet_id.clone(),
            metal: domain.metal.clone(),
            grams: domain.grams.to_string(),
            cost_basis: domain.cost_basis.to_string(),
            cost_currency: domain.cost_currency.clone(),
            quote_symbol: domain.quote_symbol.clone(),
        }
    }
}
