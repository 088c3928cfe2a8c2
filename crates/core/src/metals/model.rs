use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// (wallet, metal) unique row (spec §3). `quote_symbol` is the market-data
/// symbol used by the metal valuator (e.g. `XAUUSD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetalHolding {
    pub id: String,
    pub wallet_id: String,
    pub metal: String,
    pub grams: Decimal,
    pub cost_basis: Decimal,
    pub cost_currency: String,
    pub quote_symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMetalHolding {
    pub wallet_id: String,
    pub metal: String,
    pub grams: Decimal,
    pub cost_basis: Decimal,
    pub cost_currency: String,
    pub quote_symbol: String,
}

impl NewMetalHolding {
    pub fn validate(&self) -> Result<()> {
        if self.grams <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput("grams must be > 0".into()).into());
        }
        if self.metal.trim().is_empty() {
            return Err(ValidationError::MissingField("metal").into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellMetalRequest {
    pub grams_sold: Decimal,
    pub proceeds: Decimal,
}

/// Outcome of a partial/full metal sale (spec §9 Open Question 2:
/// proportional reduction of both grams and cost_basis by the sold
/// fraction, realized P&L = proceeds − proportional_cost).
#[derive(Debug, Clone)]
pub struct SellMetalResult {
    pub remaining: Option<MetalHolding>,
    pub realized_pnl: Decimal,
}
