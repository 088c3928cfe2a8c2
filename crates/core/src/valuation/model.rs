use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-section health flags propagated up from a valuator to the Aggregator
/// (spec §4.5, §4.3). `needs_review` is the cash valuator's "could not
/// convert everything" signal; `missing_quotes`/`stale_quotes` come from the
/// brokerage and metal valuators; `projection_mismatch` is set by the
/// Aggregator itself when a live total disagrees with its frozen snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub needs_review: bool,
    pub missing_quotes: u32,
    pub stale_quotes: u32,
    pub projection_mismatch: bool,
}

impl Health {
    pub fn merge(self, other: Health) -> Health {
        Health {
            needs_review: self.needs_review || other.needs_review,
            missing_quotes: self.missing_quotes + other.missing_quotes,
            stale_quotes: self.stale_quotes + other.stale_quotes,
            projection_mismatch: self.projection_mismatch || other.projection_mismatch,
        }
    }

    pub fn has_issue(&self) -> bool {
        self.needs_review || self.missing_quotes > 0 || self.stale_quotes > 0 || self.projection_mismatch
    }
}

/// The four valuator variants (spec §9: "dynamic dispatch over asset
/// classes... model as a sum type, do not introduce an inheritance
/// hierarchy"). Used by the Aggregator to iterate a wallet's sections
/// uniformly when computing `pct_of_total` (SPEC_FULL §2.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClassKind {
    Cash,
    Brokerage,
    Metal,
    RealEstate,
}

/// One class's already-converted total, paired with its kind for
/// `pct_of_total` computation.
#[derive(Debug, Clone, Copy)]
pub struct AssetClassTotal {
    pub kind: AssetClassKind,
    pub value: Decimal,
}

/// Computes each entry's share of `sum(values)`, zero when the total is
/// zero (SPEC_FULL §2.2, grounded on the original's `wallet_manager.py`
/// pie-chart percentages).
pub fn percentages_of_total(totals: &[AssetClassTotal]) -> Vec<(AssetClassKind, Decimal)> {
    let grand_total: Decimal = totals.iter().map(|t| t.value).sum();
    totals
        .iter()
        .map(|t| {
            let pct = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                t.value / grand_total
            };
            (t.kind, pct)
        })
        .collect()
}
