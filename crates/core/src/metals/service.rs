use std::sync::Arc;

use rust_decimal::Decimal;

use crate::constants::QUANTITY_THRESHOLD;
use crate::errors::{Result, ValidationError};

use super::model::{MetalHolding, SellMetalRequest, SellMetalResult};
use super::traits::MetalHoldingRepositoryTrait;

/// Pure sell computation implementing spec §9 Open Question 2: selling
/// `grams_sold` reduces both `grams` and `cost_basis` by the same fraction,
/// and realized P&L is `proceeds - proportional_cost`. The row is
/// considered closed (and should be deleted) once grams fall below
/// [`QUANTITY_THRESHOLD`].
pub fn sell(holding: &MetalHolding, request: &SellMetalRequest) -> Result<SellMetalResult> {
    if request.grams_sold <= Decimal::ZERO || request.grams_sold > holding.grams {
        return Err(ValidationError::InsufficientQuantity {
            account_id: holding.id.clone(),
            requested: request.grams_sold.to_string(),
            available: holding.grams.to_string(),
        }
        .into());
    }

    let sold_fraction = request.grams_sold / holding.grams;
    let cost_removed = holding.cost_basis * sold_fraction;
    let realized_pnl = request.proceeds - cost_removed;

    let remaining_grams = holding.grams - request.grams_sold;
    let threshold: Decimal = QUANTITY_THRESHOLD.parse().expect("valid decimal constant");

    let remaining = if remaining_grams <= threshold {
        None
    } else {
        Some(MetalHolding {
            grams: remaining_grams,
            cost_basis: holding.cost_basis - cost_removed,
            ..holding.clone()
        })
    };

    Ok(SellMetalResult {
        remaining,
        realized_pnl,
    })
}

pub struct MetalService {
    repo: Arc<dyn MetalHoldingRepositoryTrait>,
}

impl MetalService {
    pub fn new(repo: Arc<dyn MetalHoldingRepositoryTrait>) -> Self {
        Self { repo }
    }

    pub async fn sell(&self, holding_id: &str, request: SellMetalRequest) -> Result<SellMetalResult> {
        let holding = self.repo.get_by_id(holding_id).await?;
        let result = sell(&holding, &request)?;
        self.repo.save_or_delete(holding_id, result.remaining.clone()).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding() -> MetalHolding {
        MetalHolding {
            id: "m1".into(),
            wallet_id: "w1".into(),
            metal: "gold".into(),
            grams: dec!(100),
            cost_basis: dec!(5000),
            cost_currency: "USD".into(),
            quote_symbol: "XAUUSD".into(),
        }
    }

    #[test]
    fn partial_sell_reduces_proportionally() {
        let h = holding();
        let result = sell(&h, &SellMetalRequest { grams_sold: dec!(25), proceeds: dec!(1600) }).unwrap();
        let remaining = result.remaining.unwrap();
        assert_eq!(remaining.grams, dec!(75));
        assert_eq!(remaining.cost_basis, dec!(3750));
        // cost removed = 5000 * 0.25 = 1250; pnl = 1600 - 1250 = 350
        assert_eq!(result.realized_pnl, dec!(350));
    }

    #[test]
    fn full_sell_closes_the_row() {
        let h = holding();
        let result = sell(&h, &SellMetalRequest { grams_sold: dec!(100), proceeds: dec!(6500) }).unwrap();
        assert!(result.remaining.is_none());
        assert_eq!(result.realized_pnl, dec!(1500));
    }

    #[test]
    fn overselling_is_rejected() {
        let h = holding();
        let err = sell(&h, &SellMetalRequest { grams_sold: dec!(200), proceeds: dec!(1) }).unwrap_err();
        assert!(matches!(err, crate::errors::Error::Validation(_)));
    }
}
