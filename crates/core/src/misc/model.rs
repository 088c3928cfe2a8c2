use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Value object on a wallet (spec §3). `remaining_after` supplements the
/// spec with the burn-down computation the original's `debts.py` component
/// displays (SPEC_FULL §2.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub principal: Decimal,
    pub currency: String,
    pub monthly_payment: Decimal,
}

impl Debt {
    /// Remaining balance after `payments_made` monthly installments,
    /// floored at zero.
    pub fn remaining_after(&self, payments_made: u32) -> Decimal {
        let paid = self.monthly_payment * Decimal::from(payments_made);
        (self.principal - paid).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: String,
    pub wallet_id: String,
    pub name: String,
    pub amount: Decimal,
    pub currency: String,
    pub day_of_month: u32,
}

impl RecurringExpense {
    /// Next due date on/after `from`, supplementing the spec with the
    /// original's `expenses.py` due-date computation.
    pub fn next_due_on(&self, from: NaiveDate) -> NaiveDate {
        let day = self.day_of_month.clamp(1, 28);
        let candidate = NaiveDate::from_ymd_opt(from.year(), from.month(), day).unwrap_or(from);
        if candidate >= from {
            candidate
        } else {
            let (y, m) = if from.month() == 12 {
                (from.year() + 1, 1)
            } else {
                (from.year(), from.month() + 1)
            };
            NaiveDate::from_ymd_opt(y, m, day).unwrap_or(candidate)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearGoal {
    pub id: String,
    pub wallet_id: String,
    pub year: i32,
    pub name: String,
    pub target_amount: Decimal,
    pub currency: String,
    pub current_amount: Decimal,
}

impl YearGoal {
    /// Fractional progress toward the target, supplementing the spec with
    /// the original's `year_goal.py` progress bar computation. Zero-target
    /// guard mirrors the other zero-cost guards in the valuators.
    pub fn progress_fraction(&self) -> Decimal {
        if self.target_amount.is_zero() {
            return Decimal::ZERO;
        }
        self.current_amount / self.target_amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNote {
    pub id: String,
    pub user_id: String,
    pub body: String,
}
