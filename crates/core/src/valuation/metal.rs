//! Metal valuator (spec §4.3): prices each holding from its quote symbol
//! (price per troy ounce) when available, falling back to cost basis.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::model::Health;
use crate::constants::{GRAMS_PER_TROY_OUNCE, QUOTE_STALE_THRESHOLD_HOURS};
use crate::metals::MetalHolding;
use crate::money::{self, RateTable};
use moneta_market_data::Quote;

#[derive(Debug, Clone)]
pub struct MetalItemValuation {
    pub id: String,
    pub metal: String,
    pub grams: Decimal,
    pub value: Decimal,
    pub currency: String,
    pub value_target_ccy: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct MetalValuation {
    pub total: Decimal,
    pub items: Vec<MetalItemValuation>,
    pub health: Health,
}

pub fn value_metals(
    holdings: &[MetalHolding],
    quotes: &HashMap<String, Quote>,
    target_ccy: &str,
    rates: &RateTable,
    now: NaiveDateTime,
) -> MetalValuation {
    let troy_ounce: Decimal = GRAMS_PER_TROY_OUNCE.parse().expect("valid decimal constant");
    let mut total = Decimal::ZERO;
    let mut missing_quotes = 0u32;
    let mut stale_quotes = 0u32;
    let mut needs_review = false;
    let mut items = Vec::with_capacity(holdings.len());

    for holding in holdings {
        let (value, source_ccy) = match quotes.get(&holding.quote_symbol) {
            Some(quote) => {
                if now.signed_duration_since(quote.as_of) > chrono::Duration::hours(QUOTE_STALE_THRESHOLD_HOURS) {
                    stale_quotes += 1;
                }
                ((holding.grams / troy_ounce) * quote.price, quote.currency.clone())
            }
            None => {
                missing_quotes += 1;
                (holding.cost_basis, holding.cost_currency.clone())
            }
        };

        let value_target_ccy = money::convert(value, &source_ccy, target_ccy, rates);
        match value_target_ccy {
            Some(converted) => total += converted,
            None => needs_review = true,
        }

        items.push(MetalItemValuation {
            id: holding.id.clone(),
            metal: holding.metal.clone(),
            grams: holding.grams,
            value,
            currency: source_ccy,
            value_target_ccy,
        });
    }

    MetalValuation {
        total,
        items,
        health: Health {
            needs_review,
            missing_quotes,
            stale_quotes,
            ..Health::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneta_market_data::DataSource;
    use rust_decimal_macros::dec;

    fn rates() -> RateTable {
        HashMap::from([("USD".to_string(), dec!(0.25)), ("PLN".to_string(), dec!(1.0))])
    }

    fn holding() -> MetalHolding {
        MetalHolding {
            id: "m1".into(),
            wallet_id: "w1".into(),
            metal: "gold".into(),
            grams: dec!(31.1034768),
            cost_basis: dec!(5000),
            cost_currency: "USD".into(),
            quote_symbol: "XAUUSD".into(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(1, 0, 0).unwrap()
    }

    #[test]
    fn values_one_troy_ounce_from_quote() {
        // spec §8 scenario 4
        let quotes = HashMap::from([(
            "XAUUSD".to_string(),
            Quote {
                symbol: "XAUUSD".into(),
                price: dec!(2000),
                currency: "USD".into(),
                as_of: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
                source: DataSource::Provider,
            },
        )]);
        let v = value_metals(&[holding()], &quotes, "PLN", &rates(), now());
        assert_eq!(v.total, dec!(8000.00));
        assert_eq!(v.health.missing_quotes, 0);
        assert_eq!(v.health.stale_quotes, 0);
    }

    #[test]
    fn falls_back_to_cost_basis_without_quote() {
        let v = value_metals(&[holding()], &HashMap::new(), "USD", &rates(), now());
        assert_eq!(v.total, dec!(5000.00));
        assert_eq!(v.health.missing_quotes, 1);
    }

    #[test]
    fn quote_older_than_threshold_counts_as_stale() {
        let quotes = HashMap::from([(
            "XAUUSD".to_string(),
            Quote {
                symbol: "XAUUSD".into(),
                price: dec!(2000),
                currency: "USD".into(),
                as_of: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
                source: DataSource::Provider,
            },
        )]);
        let far_future = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let v = value_metals(&[holding()], &quotes, "PLN", &rates(), far_future);
        assert_eq!(v.health.stale_quotes, 1);
        assert_eq!(v.health.missing_quotes, 0);
    }
}
