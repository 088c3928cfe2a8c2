//! Aggregate real-estate valuator: applies the fallback-chain price lookup
//! ([`crate::real_estate::valuator::value_real_estate`]) to every property
//! in scope and converts the result into a target currency.

use rust_decimal::Decimal;

use super::model::Health;
use crate::money::{self, RateTable};
use crate::real_estate::model::{RealEstate, RealEstatePrice};
use crate::real_estate::valuator::value_real_estate;

#[derive(Debug, Clone)]
pub struct RealEstateItemValuation {
    pub id: String,
    pub name: String,
    pub city: String,
    pub value: Decimal,
    pub currency: String,
    pub value_target_ccy: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct RealEstateAggregateValuation {
    pub total: Decimal,
    pub items: Vec<RealEstateItemValuation>,
    pub health: Health,
}

/// `catalog` holds every `RealEstatePrice` row for the property types in
/// `properties`; the fallback chain runs per property (spec §4.3).
pub fn value_real_estates(
    properties: &[RealEstate],
    catalog: &[RealEstatePrice],
    target_ccy: &str,
    rates: &RateTable,
) -> RealEstateAggregateValuation {
    let mut total = Decimal::ZERO;
    let mut needs_review = false;
    let mut missing_price_count = 0u32;
    let mut items = Vec::with_capacity(properties.len());

    for property in properties {
        let valuation = value_real_estate(property, catalog, &property.purchase_currency);
        if valuation.missing_price {
            missing_price_count += 1;
        }

        let value_target_ccy = money::convert(valuation.value, &valuation.currency, target_ccy, rates);
        match value_target_ccy {
            Some(converted) => total += converted,
            None => needs_review = true,
        }

        items.push(RealEstateItemValuation {
            id: property.id.clone(),
            name: property.name.clone(),
            city: property.city.clone(),
            value: valuation.value,
            currency: valuation.currency,
            value_target_ccy,
        });
    }

    RealEstateAggregateValuation {
        total,
        items,
        health: Health {
            needs_review,
            missing_quotes: missing_price_count,
            ..Health::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn property() -> RealEstate {
        RealEstate {
            id: "re1".into(),
            wallet_id: "w1".into(),
            name: "Flat".into(),
            property_type: "APARTMENT".into(),
            country: "PL".into(),
            city: "Warsaw".into(),
            area: dec!(0),
            purchase_price: dec!(500000),
            purchase_currency: "PLN".into(),
        }
    }

    #[test]
    fn falls_back_and_flags_missing_price() {
        let rates = HashMap::from([("PLN".to_string(), dec!(1.0))]);
        let v = value_real_estates(&[property()], &[], "PLN", &rates);
        assert_eq!(v.total, dec!(500000));
        assert_eq!(v.health.missing_quotes, 1);
    }
}
