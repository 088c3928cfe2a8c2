//! Snapshot Engine (spec §4.4): atomically materializes one month's frozen
//! rows for a wallet. External I/O (quotes, FX) happens before any repo
//! write; the repositories are expected to apply their upserts inside one
//! database transaction (spec §4.4, §5), which is the storage layer's
//! responsibility — this engine only sequences the pure computation and the
//! writes in the right order.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::brokerage::{
    BrokerageAccountRepositoryTrait, BrokerageDepositLinkRepositoryTrait, HoldingRepositoryTrait,
    InstrumentRepositoryTrait,
};
use crate::deposit::DepositAccountRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::fx::model::FxMonthlySnapshot;
use crate::fx::traits::FxSnapshotRepositoryTrait;
use crate::market_data::QuoteSource;
use crate::metals::MetalHoldingRepositoryTrait;
use crate::money::RateTable;
use crate::real_estate::{RealEstatePriceRepositoryTrait, RealEstateRepositoryTrait};
use crate::valuation::{value_brokerage, value_metals, value_real_estates, PositionInput};
use crate::wallet::Wallet;

use super::model::{
    BrokerageAccountMonthlySnapshot, DepositAccountMonthlySnapshot, MetalHoldingMonthlySnapshot,
    RealEstateMonthlySnapshot, SnapshotSummary,
};
use super::traits::{
    BrokerageAccountSnapshotRepositoryTrait, DepositAccountSnapshotRepositoryTrait,
    MetalHoldingSnapshotRepositoryTrait, RealEstateSnapshotRepositoryTrait,
};

/// `YYYY-MM`, e.g. `2025-11` (spec §3 "Month key").
pub fn validate_month_key(month_key: &str) -> Result<()> {
    let valid = month_key.len() == 7
        && month_key.as_bytes()[4] == b'-'
        && month_key[..4].chars().all(|c| c.is_ascii_digit())
        && month_key[5..].chars().all(|c| c.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidMonthKey(month_key.to_string()).into())
    }
}

pub struct SnapshotEngine {
    deposit_accounts: Arc<dyn DepositAccountRepositoryTrait>,
    brokerage_accounts: Arc<dyn BrokerageAccountRepositoryTrait>,
    brokerage_links: Arc<dyn BrokerageDepositLinkRepositoryTrait>,
    holdings: Arc<dyn HoldingRepositoryTrait>,
    instruments: Arc<dyn InstrumentRepositoryTrait>,
    metal_holdings: Arc<dyn MetalHoldingRepositoryTrait>,
    real_estates: Arc<dyn RealEstateRepositoryTrait>,
    real_estate_prices: Arc<dyn RealEstatePriceRepositoryTrait>,
    fx_snapshots: Arc<dyn FxSnapshotRepositoryTrait>,
    quotes: Arc<dyn QuoteSource>,
    deposit_snapshots: Arc<dyn DepositAccountSnapshotRepositoryTrait>,
    brokerage_snapshots: Arc<dyn BrokerageAccountSnapshotRepositoryTrait>,
    metal_snapshots: Arc<dyn MetalHoldingSnapshotRepositoryTrait>,
    real_estate_snapshots: Arc<dyn RealEstateSnapshotRepositoryTrait>,
}

impl SnapshotEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        deposit_accounts: Arc<dyn DepositAccountRepositoryTrait>,
        brokerage_accounts: Arc<dyn BrokerageAccountRepositoryTrait>,
        brokerage_links: Arc<dyn BrokerageDepositLinkRepositoryTrait>,
        holdings: Arc<dyn HoldingRepositoryTrait>,
        instruments: Arc<dyn InstrumentRepositoryTrait>,
        metal_holdings: Arc<dyn MetalHoldingRepositoryTrait>,
        real_estates: Arc<dyn RealEstateRepositoryTrait>,
        real_estate_prices: Arc<dyn RealEstatePriceRepositoryTrait>,
        fx_snapshots: Arc<dyn FxSnapshotRepositoryTrait>,
        quotes: Arc<dyn QuoteSource>,
        deposit_snapshots: Arc<dyn DepositAccountSnapshotRepositoryTrait>,
        brokerage_snapshots: Arc<dyn BrokerageAccountSnapshotRepositoryTrait>,
        metal_snapshots: Arc<dyn MetalHoldingSnapshotRepositoryTrait>,
        real_estate_snapshots: Arc<dyn RealEstateSnapshotRepositoryTrait>,
    ) -> Self {
        Self {
            deposit_accounts,
            brokerage_accounts,
            brokerage_links,
            holdings,
            instruments,
            metal_holdings,
            real_estates,
            real_estate_prices,
            fx_snapshots,
            quotes,
            deposit_snapshots,
            brokerage_snapshots,
            metal_snapshots,
            real_estate_snapshots,
        }
    }

    /// Materializes `month_key` for `wallet` using `rates` as the month's FX
    /// table (spec §4.4). Re-running with the same inputs is idempotent:
    /// every row is recomputed from scratch and upserted on
    /// `(entity_id, month_key)` (spec §8 scenario 5).
    pub async fn run_for_wallet(&self, wallet: &Wallet, month_key: &str, rates: RateTable) -> Result<SnapshotSummary> {
        validate_month_key(month_key)?;
        log::info!("running snapshot engine for wallet {} month {}", wallet.id, month_key);

        let now = Utc::now().naive_utc();

        self.fx_snapshots
            .upsert(&FxMonthlySnapshot {
                month_key: month_key.to_string(),
                rates: rates.clone(),
                captured_at: now,
            })
            .await?;

        let metal_holdings = self.metal_holdings.list_for_wallet(&wallet.id).await?;
        let real_estates = self.real_estates.list_for_wallet(&wallet.id).await?;
        let brokerage_accounts = self.brokerage_accounts.list_for_wallet(&wallet.id).await?;

        let mut symbols: Vec<String> = metal_holdings.iter().map(|h| h.quote_symbol.clone()).collect();

        // Pre-load every (account, instrument) pair's position so the
        // instrument symbols can be batched into one quote fetch, matching
        // "quotes fetched in one batch per request" (spec §5).
        let mut account_positions: Vec<(String, Vec<(String, crate::brokerage::Holding, String, String)>)> =
            Vec::with_capacity(brokerage_accounts.len());
        for account in &brokerage_accounts {
            let positions = self.holdings.list_for_account(&account.id).await?;
            let mut enriched = Vec::with_capacity(positions.len());
            for (instrument_id, holding) in positions {
                let instrument = self.instruments.get_by_id(&instrument_id).await?;
                symbols.push(instrument.symbol.clone());
                enriched.push((instrument_id, holding, instrument.symbol, instrument.reporting_currency));
            }
            account_positions.push((account.id.clone(), enriched));
        }
        symbols.sort();
        symbols.dedup();

        let quotes = if symbols.is_empty() {
            HashMap::new()
        } else {
            self.quotes.get_latest_quotes_for_symbols(&symbols).await.unwrap_or_default()
        };

        let mut summary = SnapshotSummary::default();

        for account in self.deposit_accounts.list_for_wallet(&wallet.id).await? {
            let balance = self.deposit_accounts.get_balance(&account.id).await?;
            self.deposit_snapshots
                .upsert(&DepositAccountMonthlySnapshot {
                    account_id: account.id.clone(),
                    month_key: month_key.to_string(),
                    available: balance.available,
                    currency: account.currency.clone(),
                })
                .await?;
            summary.deposit_accounts += 1;
        }

        for (account_id, positions) in &account_positions {
            let links = self.brokerage_links.list_for_brokerage(account_id).await?;
            let mut cash_lines = Vec::with_capacity(links.len());
            for link in links {
                let account = self.deposit_accounts.get_by_id(&link.deposit_account_id).await?;
                let balance = self.deposit_accounts.get_balance(&link.deposit_account_id).await?;
                cash_lines.push((balance.available, account.currency));
            }

            let position_inputs: Vec<PositionInput> = positions
                .iter()
                .map(|(_, holding, symbol, reporting_ccy)| PositionInput {
                    symbol: symbol.clone(),
                    quantity: holding.quantity,
                    avg_cost: holding.avg_cost,
                    reporting_ccy: reporting_ccy.clone(),
                })
                .collect();

            let valuation = value_brokerage(&cash_lines, &position_inputs, &quotes, &wallet.base_ccy, &rates, now);

            self.brokerage_snapshots
                .upsert(&BrokerageAccountMonthlySnapshot {
                    account_id: account_id.clone(),
                    month_key: month_key.to_string(),
                    cash: valuation.cash_broker,
                    stocks: valuation.stocks,
                    currency: wallet.base_ccy.clone(),
                })
                .await?;
            summary.brokerage_accounts += 1;
        }

        let metal_valuation = value_metals(&metal_holdings, &quotes, &wallet.base_ccy, &rates, now);
        for item in metal_valuation.items {
            self.metal_snapshots
                .upsert(&MetalHoldingMonthlySnapshot {
                    holding_id: item.id,
                    month_key: month_key.to_string(),
                    value: item.value,
                    currency: item.currency,
                })
                .await?;
            summary.metal_holdings += 1;
        }

        let mut catalog = Vec::new();
        for property in &real_estates {
            catalog.extend(self.real_estate_prices.list_for_type(&property.property_type).await?);
        }
        let re_valuation = value_real_estates(&real_estates, &catalog, &wallet.base_ccy, &rates);
        for item in re_valuation.items {
            self.real_estate_snapshots
                .upsert(&RealEstateMonthlySnapshot {
                    real_estate_id: item.id,
                    month_key: month_key.to_string(),
                    value: item.value,
                    currency: item.currency,
                })
                .await?;
            summary.real_estates += 1;
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_month_key() {
        assert!(validate_month_key("2025-11").is_ok());
    }

    #[test]
    fn rejects_malformed_month_key() {
        assert!(validate_month_key("2025-1").is_err());
        assert!(validate_month_key("November-2025").is_err());
        assert!(validate_month_key("").is_err());
    }
}
