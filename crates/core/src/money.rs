//! FX/Quote Resolver (spec §4.1): pure currency conversion and rounding
//! helpers. Nothing here performs I/O; rate tables and quote maps are always
//! supplied by the caller, following the teacher's `CurrencyConverter`
//! pattern but simplified to the spec's single-pivot table contract.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::constants::CASH_SCALE;

/// A flat rate table keyed by currency code against one implicit pivot
/// currency, e.g. `{ "USD": 1.0, "EUR": 0.92, "PLN": 4.0 }` with PLN as pivot.
pub type RateTable = HashMap<String, Decimal>;

/// Converts `amount` from `from_ccy` to `to_ccy` using `rates`, a table of
/// each currency's rate against a common pivot. Returns `None` — not zero —
/// when either currency is missing from the table (spec §4.1 "missing rate
/// contract"). Rounds to [`CASH_SCALE`] with banker's rounding at the final
/// step only, per spec §9.
pub fn convert(amount: Decimal, from_ccy: &str, to_ccy: &str, rates: &RateTable) -> Option<Decimal> {
    if from_ccy == to_ccy {
        return Some(amount);
    }
    let from_rate = *rates.get(from_ccy)?;
    let to_rate = *rates.get(to_ccy)?;
    if from_rate.is_zero() {
        return None;
    }
    let pivot_amount = amount / from_rate;
    let converted = pivot_amount * to_rate;
    Some(converted.round_dp_with_strategy(
        CASH_SCALE,
        rust_decimal::RoundingStrategy::MidpointNearestEven,
    ))
}

/// Same as [`convert`] but keeps full precision (no rounding), used where the
/// result feeds further arithmetic (e.g. snapshot composition) rather than
/// being displayed directly.
pub fn convert_unrounded(
    amount: Decimal,
    from_ccy: &str,
    to_ccy: &str,
    rates: &RateTable,
) -> Option<Decimal> {
    if from_ccy == to_ccy {
        return Some(amount);
    }
    let from_rate = *rates.get(from_ccy)?;
    let to_rate = *rates.get(to_ccy)?;
    if from_rate.is_zero() {
        return None;
    }
    Some((amount / from_rate) * to_rate)
}

/// Looks up a quote's price/currency pair from a batch-loaded quotes map
/// (spec §4.1 `quote_for`). Missing symbols return `None`.
pub fn quote_for<'a>(
    symbol: &str,
    quotes: &'a HashMap<String, moneta_market_data::Quote>,
) -> Option<(Decimal, &'a str)> {
    quotes.get(symbol).map(|q| (q.price, q.currency.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rates() -> RateTable {
        HashMap::from([
            ("PLN".to_string(), dec!(1.0)),
            ("USD".to_string(), dec!(0.25)),
            ("EUR".to_string(), dec!(0.23)),
        ])
    }

    #[test]
    fn identity_conversion() {
        assert_eq!(convert(dec!(100), "USD", "USD", &rates()), Some(dec!(100)));
    }

    #[test]
    fn missing_rate_is_none_not_zero() {
        assert_eq!(convert(dec!(100), "USD", "GBP", &rates()), None);
    }

    #[test]
    fn usd_to_pln() {
        // 1 USD costs 4 PLN given these pivot rates (1/0.25 = 4).
        assert_eq!(convert(dec!(2000), "USD", "PLN", &rates()), Some(dec!(8000.00)));
    }

    #[test]
    fn composition_matches_direct_conversion() {
        let r = rates();
        let via_usd = convert_unrounded(dec!(100), "PLN", "USD", &r).unwrap();
        let via_eur = convert_unrounded(via_usd, "USD", "EUR", &r).unwrap();
        let direct = convert_unrounded(dec!(100), "PLN", "EUR", &r).unwrap();
        assert!((via_eur - direct).abs() < dec!(0.00000001));
    }
}
