//! Cash valuator (spec §4.3): sums `DepositAccount` available balances,
//! converting each to a target currency. A missing FX rate marks the wallet
//! `needs_review` and skips that amount rather than treating it as zero.

use rust_decimal::Decimal;

use super::model::Health;
use crate::money::{self, RateTable};

#[derive(Debug, Clone, Copy, Default)]
pub struct CashValuation {
    pub total: Decimal,
    pub health: Health,
}

/// `balances` is `(available, currency)` for every account in scope.
pub fn value_cash(balances: &[(Decimal, String)], target_ccy: &str, rates: &RateTable) -> CashValuation {
    let mut total = Decimal::ZERO;
    let mut needs_review = false;

    for (available, ccy) in balances {
        match money::convert(*available, ccy, target_ccy, rates) {
            Some(converted) => total += converted,
            None => needs_review = true,
        }
    }

    CashValuation {
        total,
        health: Health {
            needs_review,
            ..Health::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn rates() -> RateTable {
        HashMap::from([("PLN".to_string(), dec!(1.0)), ("USD".to_string(), dec!(0.25))])
    }

    #[test]
    fn sums_and_converts_every_balance() {
        let balances = vec![(dec!(1000), "PLN".to_string()), (dec!(100), "USD".to_string())];
        let v = value_cash(&balances, "PLN", &rates());
        assert_eq!(v.total, dec!(1400.00));
        assert!(!v.health.needs_review);
    }

    #[test]
    fn missing_rate_flags_needs_review_and_skips_amount() {
        let balances = vec![(dec!(1000), "PLN".to_string()), (dec!(50), "GBP".to_string())];
        let v = value_cash(&balances, "PLN", &rates());
        assert_eq!(v.total, dec!(1000));
        assert!(v.health.needs_review);
    }
}
