//! Real-estate valuator (spec §4.3). Pure given the property and a
//! pre-loaded price catalog.

use rust_decimal::Decimal;

use super::model::{RealEstate, RealEstatePrice};

#[derive(Debug, Clone)]
pub struct RealEstateValuation {
    pub value: Decimal,
    pub currency: String,
    pub missing_price: bool,
}

/// Looks up the latest matching price with the fallback chain from spec
/// §4.3, newest-first within each step:
/// exact(type,country,city,currency) → (type,country,*,currency) →
/// (type,*,*,currency) → any(type,*,*,*). `currency` is part of every
/// bucket except the last.
fn resolve_price<'a>(re: &RealEstate, catalog: &'a [RealEstatePrice], currency: &str) -> Option<&'a RealEstatePrice> {
    let by_type: Vec<&RealEstatePrice> = catalog
        .iter()
        .filter(|p| p.property_type == re.property_type)
        .collect();

    let newest = |candidates: Vec<&'a RealEstatePrice>| {
        candidates.into_iter().max_by_key(|p| p.as_of)
    };

    let exact = by_type
        .iter()
        .copied()
        .filter(|p| {
            p.country.as_deref() == Some(re.country.as_str())
                && p.city.as_deref() == Some(re.city.as_str())
                && p.currency == currency
        })
        .collect::<Vec<_>>();
    if let Some(p) = newest(exact) {
        return Some(p);
    }

    let country_only = by_type
        .iter()
        .copied()
        .filter(|p| p.country.as_deref() == Some(re.country.as_str()) && p.city.is_none() && p.currency == currency)
        .collect::<Vec<_>>();
    if let Some(p) = newest(country_only) {
        return Some(p);
    }

    let type_any_location = by_type
        .iter()
        .copied()
        .filter(|p| p.country.is_none() && p.city.is_none() && p.currency == currency)
        .collect::<Vec<_>>();
    if let Some(p) = newest(type_any_location) {
        return Some(p);
    }

    newest(by_type)
}

/// Values one `RealEstate` in `currency` (falling back to the purchase
/// currency when no price matches). Conversion to a target currency is the
/// caller's job via [`crate::money::convert`], matching every other
/// valuator's shape.
pub fn value_real_estate(re: &RealEstate, catalog: &[RealEstatePrice], currency: &str) -> RealEstateValuation {
    if let Some(price) = resolve_price(re, catalog, currency) {
        if re.area > Decimal::ZERO {
            return RealEstateValuation {
                value: re.area * price.price_per_m2,
                currency: price.currency.clone(),
                missing_price: false,
            };
        }
    }
    RealEstateValuation {
        value: re.purchase_price,
        currency: re.purchase_currency.clone(),
        missing_price: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn re() -> RealEstate {
        RealEstate {
            id: "re1".into(),
            wallet_id: "w1".into(),
            name: "Flat".into(),
            property_type: "APARTMENT".into(),
            country: "PL".into(),
            city: "Warsaw".into(),
            area: dec!(50),
            purchase_price: dec!(500000),
            purchase_currency: "PLN".into(),
        }
    }

    fn price(country: Option<&str>, city: Option<&str>, ppm2: Decimal, date: (i32, u32, u32)) -> RealEstatePrice {
        RealEstatePrice {
            id: uuid_like(),
            property_type: "APARTMENT".into(),
            country: country.map(str::to_string),
            city: city.map(str::to_string),
            currency: "PLN".into(),
            price_per_m2: ppm2,
            as_of: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    fn uuid_like() -> String {
        "p".into()
    }

    #[test]
    fn exact_match_wins() {
        let catalog = vec![
            price(Some("PL"), None, dec!(10000), (2025, 1, 1)),
            price(Some("PL"), Some("Warsaw"), dec!(15000), (2025, 1, 1)),
        ];
        let v = value_real_estate(&re(), &catalog, "PLN");
        assert_eq!(v.value, dec!(750000));
        assert!(!v.missing_price);
    }

    #[test]
    fn falls_back_to_country_level() {
        let catalog = vec![price(Some("PL"), None, dec!(10000), (2025, 1, 1))];
        let v = value_real_estate(&re(), &catalog, "PLN");
        assert_eq!(v.value, dec!(500000));
    }

    #[test]
    fn falls_back_to_purchase_price_when_no_match() {
        let v = value_real_estate(&re(), &[], "PLN");
        assert_eq!(v.value, dec!(500000));
        assert!(v.missing_price);
    }

    #[test]
    fn newest_wins_within_same_bucket() {
        let catalog = vec![
            price(Some("PL"), Some("Warsaw"), dec!(10000), (2024, 1, 1)),
            price(Some("PL"), Some("Warsaw"), dec!(20000), (2025, 1, 1)),
        ];
        let v = value_real_estate(&re(), &catalog, "PLN");
        assert_eq!(v.value, dec!(1000000));
    }

    #[test]
    fn currency_mismatch_is_skipped_in_favor_of_a_matching_looser_bucket() {
        let mut city_wrong_ccy = price(Some("PL"), Some("Warsaw"), dec!(20000), (2025, 1, 1));
        city_wrong_ccy.currency = "USD".into();
        let country_right_ccy = price(Some("PL"), None, dec!(10000), (2025, 1, 1));
        let catalog = vec![city_wrong_ccy, country_right_ccy];

        let v = value_real_estate(&re(), &catalog, "PLN");
        assert_eq!(v.value, dec!(500000));
        assert_eq!(v.currency, "PLN");
    }
}
