//! Brokerage valuator (spec §4.3): splits a brokerage account into its
//! linked cash lines and its stock positions, pricing each position from a
//! batch-loaded quote map and falling back to "missing quote" rather than
//! inventing a price.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::model::Health;
use crate::constants::QUOTE_STALE_THRESHOLD_HOURS;
use crate::money::{self, RateTable};
use moneta_market_data::Quote;

#[derive(Debug, Clone)]
pub struct PositionInput {
    pub symbol: String,
    pub quantity: Decimal,
    pub avg_cost: Decimal,
    pub reporting_ccy: String,
}

#[derive(Debug, Clone)]
pub struct PositionValuation {
    pub symbol: String,
    pub quantity: Decimal,
    pub value: Decimal,
    pub currency: String,
    pub value_target_ccy: Option<Decimal>,
    pub pnl_pct: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct BrokerageValuation {
    pub cash_broker: Decimal,
    pub stocks: Decimal,
    pub positions: Vec<PositionValuation>,
    pub health: Health,
}

/// `(qty·price − qty·avg_cost) / (qty·avg_cost)`, zero when cost basis is
/// zero (spec §4.3 "zero-cost guard").
fn pnl_pct(quantity: Decimal, avg_cost: Decimal, price: Decimal) -> Decimal {
    let cost = quantity * avg_cost;
    if cost.is_zero() {
        return Decimal::ZERO;
    }
    (quantity * price - cost) / cost
}

/// `cash_lines` is `(available, currency)` for every `DepositAccount` linked
/// to the brokerage account via `BrokerageDepositLink`.
pub fn value_brokerage(
    cash_lines: &[(Decimal, String)],
    positions: &[PositionInput],
    quotes: &HashMap<String, Quote>,
    target_ccy: &str,
    rates: &RateTable,
    now: NaiveDateTime,
) -> BrokerageValuation {
    let mut cash_broker = Decimal::ZERO;
    let mut needs_review = false;
    for (available, ccy) in cash_lines {
        match money::convert(*available, ccy, target_ccy, rates) {
            Some(converted) => cash_broker += converted,
            None => needs_review = true,
        }
    }

    let mut stocks = Decimal::ZERO;
    let mut missing_quotes = 0u32;
    let mut stale_quotes = 0u32;
    let mut out_positions = Vec::with_capacity(positions.len());

    for position in positions {
        let Some(quote) = quotes.get(&position.symbol) else {
            missing_quotes += 1;
            out_positions.push(PositionValuation {
                symbol: position.symbol.clone(),
                quantity: position.quantity,
                value: Decimal::ZERO,
                currency: position.reporting_ccy.clone(),
                value_target_ccy: None,
                pnl_pct: Decimal::ZERO,
            });
            continue;
        };
        if now.signed_duration_since(quote.as_of) > chrono::Duration::hours(QUOTE_STALE_THRESHOLD_HOURS) {
            stale_quotes += 1;
        }
        let (raw_price, quote_ccy) = (quote.price, quote.currency.as_str());

        let price = if quote_ccy == position.reporting_ccy {
            Some(raw_price)
        } else {
            money::convert_unrounded(raw_price, quote_ccy, &position.reporting_ccy, rates)
        };

        let Some(price) = price else {
            missing_quotes += 1;
            needs_review = true;
            out_positions.push(PositionValuation {
                symbol: position.symbol.clone(),
                quantity: position.quantity,
                value: Decimal::ZERO,
                currency: position.reporting_ccy.clone(),
                value_target_ccy: None,
                pnl_pct: Decimal::ZERO,
            });
            continue;
        };

        let value = position.quantity * price;
        let value_target_ccy = money::convert(value, &position.reporting_ccy, target_ccy, rates);
        if value_target_ccy.is_none() {
            needs_review = true;
        } else {
            stocks += value_target_ccy.unwrap();
        }

        out_positions.push(PositionValuation {
            symbol: position.symbol.clone(),
            quantity: position.quantity,
            value,
            currency: position.reporting_ccy.clone(),
            value_target_ccy,
            pnl_pct: pnl_pct(position.quantity, position.avg_cost, price),
        });
    }

    BrokerageValuation {
        cash_broker,
        stocks,
        positions: out_positions,
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
        HashMap::from([("PLN".to_string(), dec!(1.0)), ("USD".to_string(), dec!(0.25))])
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(1, 0, 0).unwrap()
    }

    fn quote(symbol: &str, price: Decimal, ccy: &str) -> Quote {
        Quote {
            symbol: symbol.into(),
            price,
            currency: ccy.into(),
            as_of: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            source: DataSource::Provider,
        }
    }

    #[test]
    fn values_position_with_quote_and_computes_pnl_pct() {
        let quotes = HashMap::from([("AAPL".to_string(), quote("AAPL", dec!(150), "USD"))]);
        let positions = vec![PositionInput {
            symbol: "AAPL".into(),
            quantity: dec!(10),
            avg_cost: dec!(100),
            reporting_ccy: "USD".into(),
        }];
        let v = value_brokerage(&[], &positions, &quotes, "PLN", &rates(), now());
        assert_eq!(v.stocks, dec!(6000.00));
        let pos = &v.positions[0];
        assert_eq!(pos.pnl_pct, dec!(0.5));
        assert_eq!(v.health.missing_quotes, 0);
        assert_eq!(v.health.stale_quotes, 0);
    }

    #[test]
    fn missing_quote_counts_and_zeroes_value() {
        let positions = vec![PositionInput {
            symbol: "TSLA".into(),
            quantity: dec!(5),
            avg_cost: dec!(200),
            reporting_ccy: "USD".into(),
        }];
        let v = value_brokerage(&[], &positions, &HashMap::new(), "PLN", &rates(), now());
        assert_eq!(v.health.missing_quotes, 1);
        assert_eq!(v.stocks, dec!(0));
    }

    #[test]
    fn quote_older_than_threshold_counts_as_stale() {
        let quotes = HashMap::from([("AAPL".to_string(), quote("AAPL", dec!(150), "USD"))]);
        let positions = vec![PositionInput {
            symbol: "AAPL".into(),
            quantity: dec!(10),
            avg_cost: dec!(100),
            reporting_ccy: "USD".into(),
        }];
        let far_future = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let v = value_brokerage(&[], &positions, &quotes, "PLN", &rates(), far_future);
        assert_eq!(v.health.stale_quotes, 1);
        assert_eq!(v.health.missing_quotes, 0);
    }

    #[test]
    fn zero_cost_guard_returns_zero_pnl() {
        assert_eq!(pnl_pct(dec!(10), dec!(0), dec!(100)), Decimal::ZERO);
    }
}
