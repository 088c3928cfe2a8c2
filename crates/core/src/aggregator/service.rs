//! Wallet Manager tree aggregator (spec §4.5): composes the per-wallet
//! breakdown across asset classes, converting live sections into the caller's
//! view currency and attaching frozen monthly snapshots with MoM deltas.
//! Performs no network I/O itself beyond one batched
//! [`crate::market_data::QuoteSource::get_latest_quotes_for_symbols`] call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::brokerage::{
    BrokerageAccountRepositoryTrait, BrokerageDepositLinkRepositoryTrait, BrokerageEventRepositoryTrait,
    HoldingRepositoryTrait, InstrumentRepositoryTrait,
};
use crate::constants::PROJECTION_MISMATCH_TOLERANCE_PCT;
use crate::deposit::{DepositAccountRepositoryTrait, TransactionRepositoryTrait};
use crate::errors::Result;
use crate::fx::traits::FxSnapshotRepositoryTrait;
use crate::market_data::QuoteSource;
use crate::metals::MetalHoldingRepositoryTrait;
use crate::money::{self, RateTable};
use crate::real_estate::{RealEstatePriceRepositoryTrait, RealEstateRepositoryTrait};
use crate::snapshot::{
    BrokerageAccountSnapshotRepositoryTrait, DepositAccountSnapshotRepositoryTrait,
    MetalHoldingSnapshotRepositoryTrait, RealEstateSnapshotRepositoryTrait,
};
use crate::valuation::{
    percentages_of_total, value_brokerage, value_cash, value_metals, value_real_estates, AssetClassKind,
    AssetClassTotal, PositionInput,
};
use crate::wallet::{Wallet, WalletRepositoryTrait};

use super::model::{
    BrokerageAccountSection, BrokerageAccountSnapshotEntry, CashAccountRef, DepositAccountSection,
    DepositAccountSnapshotEntry, MetalItemView, MetalsSection, MonthBreakdown, PositionView, RealEstateItemView,
    RealEstateSection, WalletHealth, WalletTree,
};

/// `count / number_of_months`, zero when the window is empty rather than
/// dividing by zero (spec §6.2 "per-month" fields).
fn per_month_rate(count: usize, month_keys: &[String]) -> Decimal {
    if month_keys.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from(count) / Decimal::from(month_keys.len())
}

#[allow(clippy::too_many_arguments)]
pub struct AggregatorService {
    wallets: Arc<dyn WalletRepositoryTrait>,
    deposit_accounts: Arc<dyn DepositAccountRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    brokerage_accounts: Arc<dyn BrokerageAccountRepositoryTrait>,
    brokerage_links: Arc<dyn BrokerageDepositLinkRepositoryTrait>,
    holdings: Arc<dyn HoldingRepositoryTrait>,
    instruments: Arc<dyn InstrumentRepositoryTrait>,
    brokerage_events: Arc<dyn BrokerageEventRepositoryTrait>,
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

impl AggregatorService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        wallets: Arc<dyn WalletRepositoryTrait>,
        deposit_accounts: Arc<dyn DepositAccountRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        brokerage_accounts: Arc<dyn BrokerageAccountRepositoryTrait>,
        brokerage_links: Arc<dyn BrokerageDepositLinkRepositoryTrait>,
        holdings: Arc<dyn HoldingRepositoryTrait>,
        instruments: Arc<dyn InstrumentRepositoryTrait>,
        brokerage_events: Arc<dyn BrokerageEventRepositoryTrait>,
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
            wallets,
            deposit_accounts,
            transactions,
            brokerage_accounts,
            brokerage_links,
            holdings,
            instruments,
            brokerage_events,
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

    /// Builds the tree for every wallet owned by `user_id`. `month_keys` is
    /// the trailing window the caller wants attached (e.g. the last N
    /// `YYYY-MM` keys, newest last); months whose FX snapshot is missing are
    /// dropped from the result rather than imputed (spec §4.5 step 5, §8
    /// "missing-rate contract").
    pub async fn build_tree(
        &self,
        user_id: &str,
        month_keys: &[String],
        view_ccy: &str,
        live_rates: &RateTable,
    ) -> Result<Vec<WalletTree>> {
        let wallets = self.wallets.list_for_user(user_id).await?;
        let mut trees = Vec::with_capacity(wallets.len());
        for wallet in wallets {
            trees.push(self.build_wallet_tree(&wallet, month_keys, view_ccy, live_rates).await?);
        }
        Ok(trees)
    }

    async fn build_wallet_tree(
        &self,
        wallet: &Wallet,
        month_keys: &[String],
        view_ccy: &str,
        live_rates: &RateTable,
    ) -> Result<WalletTree> {
        let deposit_accounts = self.deposit_accounts.list_for_wallet(&wallet.id).await?;
        let brokerage_accounts = self.brokerage_accounts.list_for_wallet(&wallet.id).await?;
        let metal_holdings = self.metal_holdings.list_for_wallet(&wallet.id).await?;
        let real_estates = self.real_estates.list_for_wallet(&wallet.id).await?;

        let mut symbols: Vec<String> = metal_holdings.iter().map(|h| h.quote_symbol.clone()).collect();
        let mut brokerage_positions = Vec::with_capacity(brokerage_accounts.len());
        for account in &brokerage_accounts {
            let positions = self.holdings.list_for_account(&account.id).await?;
            let mut enriched = Vec::with_capacity(positions.len());
            for (instrument_id, holding) in positions {
                let instrument = self.instruments.get_by_id(&instrument_id).await?;
                symbols.push(instrument.symbol.clone());
                enriched.push((holding, instrument.symbol, instrument.reporting_currency, instrument.mic));
            }
            brokerage_positions.push(enriched);
        }
        symbols.sort();
        symbols.dedup();
        let quotes = if symbols.is_empty() {
            HashMap::new()
        } else {
            self.quotes.get_latest_quotes_for_symbols(&symbols).await.unwrap_or_default()
        };

        let mut needs_review = false;
        let now = Utc::now().naive_utc();

        let wallet_deposit_snapshots = self.deposit_snapshots.list_for_wallet_months(&wallet.id, month_keys).await?;
        let wallet_brokerage_snapshots =
            self.brokerage_snapshots.list_for_wallet_months(&wallet.id, month_keys).await?;

        // Live deposit account sections.
        let mut deposit_sections = Vec::with_capacity(deposit_accounts.len());
        let mut cash_total = Decimal::ZERO;
        for account in &deposit_accounts {
            let balance = self.deposit_accounts.get_balance(&account.id).await?;
            let valuation = value_cash(&[(balance.available, account.currency.clone())], view_ccy, live_rates);
            needs_review |= valuation.health.needs_review;
            cash_total += valuation.total;

            let transactions = self.transactions.list_for_account(&account.id).await?;
            let tx_per_month = per_month_rate(transactions.len(), month_keys);

            let snapshots = wallet_deposit_snapshots
                .iter()
                .filter(|s| s.account_id == account.id)
                .map(|s| {
                    (
                        s.month_key.clone(),
                        DepositAccountSnapshotEntry {
                            ccy: s.currency.clone(),
                            available: s.available,
                        },
                    )
                })
                .collect();

            deposit_sections.push(DepositAccountSection {
                id: account.id.clone(),
                name: account.name.clone(),
                ccy: account.currency.clone(),
                available: balance.available,
                tx_per_month,
                health: valuation.health,
                snapshots,
                pct_of_total: Decimal::ZERO,
            });
        }

        // Live brokerage account sections.
        let mut brokerage_sections = Vec::with_capacity(brokerage_accounts.len());
        let mut broker_cash_total = Decimal::ZERO;
        let mut stocks_total = Decimal::ZERO;
        for (account, positions) in brokerage_accounts.iter().zip(brokerage_positions.iter()) {
            let links = self.brokerage_links.list_for_brokerage(&account.id).await?;
            let mut cash_refs = Vec::with_capacity(links.len());
            let mut cash_lines = Vec::with_capacity(links.len());
            for link in links {
                let deposit_account = self.deposit_accounts.get_by_id(&link.deposit_account_id).await?;
                let balance = self.deposit_accounts.get_balance(&link.deposit_account_id).await?;
                cash_lines.push((balance.available, deposit_account.currency.clone()));
                cash_refs.push(CashAccountRef {
                    deposit_account_id: link.deposit_account_id,
                    name: deposit_account.name,
                    ccy: deposit_account.currency,
                    available: balance.available,
                });
            }

            let position_inputs: Vec<PositionInput> = positions
                .iter()
                .map(|(holding, symbol, reporting_ccy, _mic)| PositionInput {
                    symbol: symbol.clone(),
                    quantity: holding.quantity,
                    avg_cost: holding.avg_cost,
                    reporting_ccy: reporting_ccy.clone(),
                })
                .collect();
            let position_mics: Vec<Option<String>> = positions.iter().map(|(_, _, _, mic)| mic.clone()).collect();

            let valuation = value_brokerage(&cash_lines, &position_inputs, &quotes, view_ccy, live_rates, now);
            broker_cash_total += valuation.cash_broker;
            stocks_total += valuation.stocks;

            let events = self.brokerage_events.list_for_account(&account.id).await?;
            let events_per_month = per_month_rate(events.len(), month_keys);

            let sum_cash_accounts: Decimal = cash_refs.iter().map(|c| c.available).sum();
            let positions_count = valuation.positions.len();
            let positions_value: Decimal = valuation.positions.iter().map(|p| p.value).sum();
            let position_views = valuation
                .positions
                .iter()
                .zip(position_mics.iter())
                .map(|(p, mic)| PositionView {
                    symbol: p.symbol.clone(),
                    mic: mic.clone(),
                    value: p.value,
                    value_default_ccy: p.value_target_ccy,
                    pnl_pct: p.pnl_pct,
                    currency: p.currency.clone(),
                })
                .collect();

            let account_snapshots: Vec<_> =
                wallet_brokerage_snapshots.iter().filter(|s| s.account_id == account.id).collect();
            let snapshots = account_snapshots
                .iter()
                .map(|s| {
                    (
                        s.month_key.clone(),
                        BrokerageAccountSnapshotEntry {
                            ccy: s.currency.clone(),
                            cash: s.cash,
                            stocks: s.stocks,
                        },
                    )
                })
                .collect();

            let mut health = valuation.health;
            if let Some(latest) = account_snapshots.iter().max_by_key(|s| &s.month_key) {
                let live_total = valuation.cash_broker + valuation.stocks;
                let frozen_total = money::convert(latest.cash + latest.stocks, &latest.currency, view_ccy, live_rates);
                if let Some(frozen_total) = frozen_total {
                    if !frozen_total.is_zero() {
                        let tolerance: Decimal = PROJECTION_MISMATCH_TOLERANCE_PCT.parse().expect("valid decimal constant");
                        let drift = ((live_total - frozen_total) / frozen_total).abs();
                        health.projection_mismatch = drift > tolerance;
                    }
                }
            }
            needs_review |= health.needs_review;

            brokerage_sections.push(BrokerageAccountSection {
                id: account.id.clone(),
                name: account.name.clone(),
                ccy: view_ccy.to_string(),
                cash_accounts: cash_refs,
                sum_cash_accounts,
                positions: position_views,
                positions_count,
                positions_value,
                events_per_month,
                health,
                snapshots,
                pct_of_total: Decimal::ZERO,
            });
        }

        // Live metals section.
        let mut re_catalog = Vec::new();
        for property in &real_estates {
            re_catalog.extend(self.real_estate_prices.list_for_type(&property.property_type).await?);
        }
        let metal_valuation = value_metals(&metal_holdings, &quotes, view_ccy, live_rates, now);
        needs_review |= metal_valuation.health.needs_review;
        let metals_section = MetalsSection {
            count: metal_holdings.len(),
            value: metal_valuation.total,
            ccy: view_ccy.to_string(),
            items: metal_holdings
                .iter()
                .zip(metal_valuation.items.iter())
                .map(|(h, v)| MetalItemView {
                    name: h.metal.clone(),
                    quantity: h.grams,
                    qty_unit: "g",
                    value: v.value_target_ccy.unwrap_or(Decimal::ZERO),
                    ccy: view_ccy.to_string(),
                })
                .collect(),
            health: metal_valuation.health,
            pct_of_total: Decimal::ZERO,
        };

        // Live real-estate section.
        let re_valuation = value_real_estates(&real_estates, &re_catalog, view_ccy, live_rates);
        needs_review |= re_valuation.health.needs_review;
        let real_estate_section = RealEstateSection {
            count: real_estates.len(),
            value: re_valuation.total,
            ccy: view_ccy.to_string(),
            items: real_estates
                .iter()
                .zip(re_valuation.items.iter())
                .map(|(re, v)| RealEstateItemView {
                    name: re.name.clone(),
                    city: re.city.clone(),
                    value: v.value_target_ccy.unwrap_or(Decimal::ZERO),
                    ccy: view_ccy.to_string(),
                })
                .collect(),
            health: re_valuation.health,
            pct_of_total: Decimal::ZERO,
        };

        let totals = [
            AssetClassTotal { kind: AssetClassKind::Cash, value: cash_total },
            AssetClassTotal {
                kind: AssetClassKind::Brokerage,
                value: broker_cash_total + stocks_total,
            },
            AssetClassTotal { kind: AssetClassKind::Metal, value: metal_valuation.total },
            AssetClassTotal {
                kind: AssetClassKind::RealEstate,
                value: re_valuation.total,
            },
        ];
        let pct = percentages_of_total(&totals);
        let pct_for = |kind: AssetClassKind| pct.iter().find(|(k, _)| *k == kind).map(|(_, p)| *p).unwrap_or_default();

        let deposit_pct = pct_for(AssetClassKind::Cash);
        for section in &mut deposit_sections {
            if cash_total.is_zero() {
                section.pct_of_total = Decimal::ZERO;
            } else {
                section.pct_of_total = deposit_pct * (section.available / cash_total);
            }
        }
        let brokerage_pct = pct_for(AssetClassKind::Brokerage);
        let brokerage_total_live = broker_cash_total + stocks_total;
        for section in &mut brokerage_sections {
            let own_total = section.sum_cash_accounts + section.positions_value;
            section.pct_of_total = if brokerage_total_live.is_zero() {
                Decimal::ZERO
            } else {
                brokerage_pct * (own_total / brokerage_total_live)
            };
        }
        let mut metals_section = metals_section;
        metals_section.pct_of_total = pct_for(AssetClassKind::Metal);
        let mut real_estate_section = real_estate_section;
        real_estate_section.pct_of_total = pct_for(AssetClassKind::RealEstate);

        // Frozen monthly breakdowns, using each month's own FX snapshot
        // (never the live rates passed in for the current view).
        let wallet_metal_snapshots = self.metal_snapshots.list_for_wallet_months(&wallet.id, month_keys).await?;
        let wallet_re_snapshots = self.real_estate_snapshots.list_for_wallet_months(&wallet.id, month_keys).await?;

        let mut snapshots = HashMap::new();
        let mut ordered_month_keys = month_keys.to_vec();
        ordered_month_keys.sort();
        let mut previous_total: Option<Decimal> = None;
        for month_key in &ordered_month_keys {
            let Some(fx_row) = self.fx_snapshots.get(month_key).await? else {
                previous_total = None;
                continue;
            };
            let deposit_rows = wallet_deposit_snapshots.iter().filter(|s| &s.month_key == month_key);
            let brokerage_rows = wallet_brokerage_snapshots.iter().filter(|s| &s.month_key == month_key);
            let metal_rows = wallet_metal_snapshots.iter().filter(|s| &s.month_key == month_key);
            let re_rows = wallet_re_snapshots.iter().filter(|s| &s.month_key == month_key);

            let mut cash_deposit = Decimal::ZERO;
            for row in deposit_rows {
                if let Some(c) = money::convert(row.available, &row.currency, &wallet.base_ccy, &fx_row.rates) {
                    cash_deposit += c;
                }
            }
            let mut cash_broker = Decimal::ZERO;
            let mut stocks = Decimal::ZERO;
            for row in brokerage_rows {
                cash_broker += row.cash;
                stocks += row.stocks;
            }
            let mut metals = Decimal::ZERO;
            for row in metal_rows {
                if let Some(c) = money::convert(row.value, &row.currency, &wallet.base_ccy, &fx_row.rates) {
                    metals += c;
                }
            }
            let mut real_estate = Decimal::ZERO;
            for row in re_rows {
                if let Some(c) = money::convert(row.value, &row.currency, &wallet.base_ccy, &fx_row.rates) {
                    real_estate += c;
                }
            }

            let total = cash_deposit + cash_broker + stocks + metals + real_estate;
            let mom = previous_total.and_then(|prev| {
                if prev.is_zero() {
                    None
                } else {
                    Some((total - prev) / prev)
                }
            });
            previous_total = Some(total);

            snapshots.insert(
                month_key.clone(),
                MonthBreakdown {
                    ccy: wallet.base_ccy.clone(),
                    cash_deposit,
                    cash_broker,
                    stocks,
                    metals,
                    real_estate,
                    total,
                    mom,
                },
            );
        }

        let mut fx_by_month = HashMap::new();
        for month_key in &ordered_month_keys {
            if let Some(row) = self.fx_snapshots.get(month_key).await? {
                fx_by_month.insert(month_key.clone(), row.rates);
            }
        }

        Ok(WalletTree {
            id: wallet.id.clone(),
            name: wallet.name.clone(),
            base_ccy: wallet.base_ccy.clone(),
            health: WalletHealth { needs_review },
            deposit_accounts: deposit_sections,
            brokerage_accounts: brokerage_sections,
            metals: metals_section,
            real_estate: real_estate_section,
            snapshots,
            fx_by_month,
        })
    }
}
