//! Holding Projector (spec §4.2): derives the `(quantity, avg_cost)` state of
//! one `(account, instrument)` pair from its ordered event stream. Pure and
//! database-agnostic — [`crate::brokerage::service::BrokerageService`] is the
//! only caller that talks to a repository; deletion/edit always re-runs
//! [`replay`] over the full corrected stream rather than inverting a single
//! event (spec §4.2, §9 "event replay vs. local inversion").

use rust_decimal::Decimal;

use crate::errors::{Error, Result, ValidationError};
use crate::money::{self, RateTable};

use super::model::{BrokerageEvent, BrokerageEventType, Holding};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HoldingState {
    pub quantity: Decimal,
    pub avg_cost: Decimal,
}

impl From<HoldingState> for Holding {
    fn from(s: HoldingState) -> Self {
        Holding {
            quantity: s.quantity,
            avg_cost: s.avg_cost,
        }
    }
}

/// Per-event replay output: the event's id, the resulting state, and (for
/// SELL only) the realized P&L in the instrument's reporting currency.
#[derive(Debug, Clone)]
pub struct ProjectedStep {
    pub event_id: String,
    pub state: HoldingState,
    pub realized_pnl: Option<Decimal>,
}

fn price_in_reporting_ccy(
    unit_price: Decimal,
    event_ccy: &str,
    reporting_ccy: &str,
    rates: &RateTable,
) -> Result<Decimal> {
    if event_ccy == reporting_ccy {
        return Ok(unit_price);
    }
    money::convert_unrounded(unit_price, event_ccy, reporting_ccy, rates).ok_or_else(|| {
        Error::DependencyUnavailable(format!(
            "no FX rate to convert event currency {event_ccy} into reporting currency {reporting_ccy}"
        ))
    })
}

/// Replays `events` (must already be sorted by `(trade_at, seq)`) starting
/// from `initial`, returning one [`ProjectedStep`] per event.
pub fn replay(
    events: &[BrokerageEvent],
    reporting_ccy: &str,
    rates: &RateTable,
    initial: HoldingState,
) -> Result<Vec<ProjectedStep>> {
    let mut state = initial;
    let mut out = Vec::with_capacity(events.len());

    for event in events {
        let realized_pnl = match event.event_type {
            BrokerageEventType::Buy => {
                let qty = event.quantity.ok_or_else(missing("quantity"))?;
                let raw_price = event.unit_price.ok_or_else(missing("unit_price"))?;
                let ccy = event.currency.as_deref().ok_or_else(missing("currency"))?;
                let price = price_in_reporting_ccy(raw_price, ccy, reporting_ccy, rates)?;

                let new_qty = state.quantity + qty;
                state.avg_cost = if new_qty.is_zero() {
                    state.avg_cost
                } else {
                    (state.quantity * state.avg_cost + qty * price) / new_qty
                };
                state.quantity = new_qty;
                None
            }
            BrokerageEventType::Sell => {
                let qty = event.quantity.ok_or_else(missing("quantity"))?;
                let raw_price = event.unit_price.ok_or_else(missing("unit_price"))?;
                let ccy = event.currency.as_deref().ok_or_else(missing("currency"))?;
                let price = price_in_reporting_ccy(raw_price, ccy, reporting_ccy, rates)?;

                if qty > state.quantity {
                    return Err(ValidationError::InsufficientQuantity {
                        account_id: event.account_id.clone(),
                        requested: qty.to_string(),
                        available: state.quantity.to_string(),
                    }
                    .into());
                }
                let pnl = qty * (price - state.avg_cost);
                state.quantity -= qty;
                Some(pnl)
            }
            BrokerageEventType::Div => None,
            BrokerageEventType::Split => {
                let ratio = event.split_ratio.ok_or_else(missing("split_ratio"))?;
                if ratio.is_zero() {
                    return Err(ValidationError::InvalidInput("split ratio must be non-zero".into()).into());
                }
                state.quantity *= ratio;
                state.avg_cost /= ratio;
                None
            }
        };

        out.push(ProjectedStep {
            event_id: event.id.clone(),
            state,
            realized_pnl,
        });
    }

    Ok(out)
}

fn missing(field: &'static str) -> impl Fn() -> Error {
    move || ValidationError::MissingField(field).into()
}

/// Sorts events by the projector's total order: `trade_at` then `seq`
/// (spec §4.2).
pub fn sorted(mut events: Vec<BrokerageEvent>) -> Vec<BrokerageEvent> {
    events.sort_by(|a, b| a.trade_at.cmp(&b.trade_at).then(a.seq.cmp(&b.seq)));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn event(
        id: &str,
        seq: i64,
        event_type: BrokerageEventType,
        quantity: Option<Decimal>,
        unit_price: Option<Decimal>,
        split_ratio: Option<Decimal>,
    ) -> BrokerageEvent {
        BrokerageEvent {
            id: id.into(),
            account_id: "acct-1".into(),
            instrument_id: "AAPL".into(),
            trade_at: NaiveDate::from_ymd_opt(2025, 1, seq as u32).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            seq,
            event_type,
            quantity,
            unit_price,
            currency: Some("USD".into()),
            split_ratio,
        }
    }

    #[test]
    fn buy_then_sell_scenario() {
        // spec §8 scenario 2
        let events = vec![
            event("e1", 1, BrokerageEventType::Buy, Some(dec!(10)), Some(dec!(100)), None),
            event("e2", 2, BrokerageEventType::Buy, Some(dec!(10)), Some(dec!(120)), None),
            event("e3", 3, BrokerageEventType::Sell, Some(dec!(5)), Some(dec!(140)), None),
        ];
        let steps = replay(&events, "USD", &HashMap::new(), HoldingState::default()).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.state.quantity, dec!(15));
        assert_eq!(last.state.avg_cost, dec!(110.00000000).normalize());
        assert_eq!(last.realized_pnl, Some(dec!(150)));
    }

    #[test]
    fn split_preserves_total_cost() {
        // spec §8 scenario 3, chained after scenario 2
        let events = vec![
            event("e1", 1, BrokerageEventType::Buy, Some(dec!(10)), Some(dec!(100)), None),
            event("e2", 2, BrokerageEventType::Buy, Some(dec!(10)), Some(dec!(120)), None),
            event("e3", 3, BrokerageEventType::Sell, Some(dec!(5)), Some(dec!(140)), None),
            event("e4", 4, BrokerageEventType::Split, None, None, Some(dec!(2))),
        ];
        let steps = replay(&events, "USD", &HashMap::new(), HoldingState::default()).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.state.quantity, dec!(30));
        assert_eq!(last.state.avg_cost, dec!(55));
        assert_eq!(last.state.quantity * last.state.avg_cost, dec!(1650));
    }

    #[test]
    fn sell_beyond_quantity_is_rejected() {
        let events = vec![event("e1", 1, BrokerageEventType::Sell, Some(dec!(1)), Some(dec!(10)), None)];
        let err = replay(&events, "USD", &HashMap::new(), HoldingState::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InsufficientQuantity { .. })
        ));
    }

    #[test]
    fn full_sell_out_leaves_avg_cost_unchanged() {
        // spec §4.2: SELL's avg_cost unchanged, even when it drains quantity to zero.
        let events = vec![
            event("e1", 1, BrokerageEventType::Buy, Some(dec!(10)), Some(dec!(100)), None),
            event("e2", 2, BrokerageEventType::Sell, Some(dec!(10)), Some(dec!(140)), None),
        ];
        let steps = replay(&events, "USD", &HashMap::new(), HoldingState::default()).unwrap();
        let last = steps.last().unwrap();
        assert_eq!(last.state.quantity, Decimal::ZERO);
        assert_eq!(last.state.avg_cost, dec!(100));
        assert_eq!(last.realized_pnl, Some(dec!(400)));
    }

    #[test]
    fn quantity_never_goes_negative_for_any_accepted_sequence() {
        let events = vec![
            event("e1", 1, BrokerageEventType::Buy, Some(dec!(5)), Some(dec!(10)), None),
            event("e2", 2, BrokerageEventType::Sell, Some(dec!(5)), Some(dec!(12)), None),
        ];
        let steps = replay(&events, "USD", &HashMap::new(), HoldingState::default()).unwrap();
        for step in &steps {
            assert!(step.state.quantity >= Decimal::ZERO);
        }
    }
}
