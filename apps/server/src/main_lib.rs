use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use moneta_core::aggregator::AggregatorService;
use moneta_core::brokerage::BrokerageService;
use moneta_core::deposit::crypto::AccountNumberCrypto;
use moneta_core::deposit::service::TransactionService;
use moneta_core::metals::service::MetalService;
use moneta_core::session::HmacSessionGate;

use moneta_core::brokerage::traits::{
    BrokerageAccountRepositoryTrait, BrokerageDepositLinkRepositoryTrait, BrokerageEventRepositoryTrait,
    HoldingRepositoryTrait, InstrumentRepositoryTrait,
};
use moneta_core::deposit::traits::{CapitalGainRepositoryTrait, DepositAccountRepositoryTrait, TransactionRepositoryTrait};
use moneta_core::fx::traits::FxSnapshotRepositoryTrait;
use moneta_core::identity::traits::{BankRepositoryTrait, UserRepositoryTrait};
use moneta_core::metals::traits::MetalHoldingRepositoryTrait;
use moneta_core::misc::traits::{
    DebtRepositoryTrait, RecurringExpenseRepositoryTrait, UserNoteRepositoryTrait, YearGoalRepositoryTrait,
};
use moneta_core::real_estate::traits::{RealEstatePriceRepositoryTrait, RealEstateRepositoryTrait};
use moneta_core::session::SessionGate;
use moneta_core::snapshot::engine::SnapshotEngine;
use moneta_core::snapshot::traits::{
    BrokerageAccountSnapshotRepositoryTrait, DepositAccountSnapshotRepositoryTrait, MetalHoldingSnapshotRepositoryTrait,
    RealEstateSnapshotRepositoryTrait,
};
use moneta_core::wallet::traits::WalletRepositoryTrait;
use moneta_market_data::{HttpQuoteSource, NullQuoteSource, QuoteSource};

use moneta_storage_sqlite::brokerage::{
    SqliteBrokerageAccountRepository, SqliteBrokerageDepositLinkRepository, SqliteBrokerageEventRepository,
    SqliteHoldingRepository, SqliteInstrumentRepository,
};
use moneta_storage_sqlite::deposit::{SqliteCapitalGainRepository, SqliteDepositAccountRepository, SqliteTransactionRepository};
use moneta_storage_sqlite::fx::SqliteFxSnapshotRepository;
use moneta_storage_sqlite::identity::{SqliteBankRepository, SqliteUserRepository};
use moneta_storage_sqlite::metals::SqliteMetalHoldingRepository;
use moneta_storage_sqlite::misc::{
    SqliteDebtRepository, SqliteRecurringExpenseRepository, SqliteUserNoteRepository, SqliteYearGoalRepository,
};
use moneta_storage_sqlite::real_estate::{SqliteRealEstatePriceRepository, SqliteRealEstateRepository};
use moneta_storage_sqlite::snapshot::{
    SqliteBrokerageAccountSnapshotRepository, SqliteDepositAccountSnapshotRepository,
    SqliteMetalHoldingSnapshotRepository, SqliteRealEstateSnapshotRepository,
};
use moneta_storage_sqlite::wallet::SqliteWalletRepository;
use moneta_storage_sqlite::{create_pool, run_migrations, spawn_writer};

use crate::config::Config;

/// Composition root for every wiring the handlers need (spec §2.1, §9
/// "process configuration... handed down as Arc fields"). Each field is a
/// trait object so repositories and services stay swappable in tests.
pub struct AppState {
    pub wallets: Arc<dyn WalletRepositoryTrait>,
    pub deposit_accounts: Arc<dyn DepositAccountRepositoryTrait>,
    pub transactions: Arc<dyn TransactionRepositoryTrait>,
    pub capital_gains: Arc<dyn CapitalGainRepositoryTrait>,
    pub brokerage_accounts: Arc<dyn BrokerageAccountRepositoryTrait>,
    pub brokerage_links: Arc<dyn BrokerageDepositLinkRepositoryTrait>,
    pub instruments: Arc<dyn InstrumentRepositoryTrait>,
    pub brokerage_events: Arc<dyn BrokerageEventRepositoryTrait>,
    pub holdings: Arc<dyn HoldingRepositoryTrait>,
    pub metal_holdings: Arc<dyn MetalHoldingRepositoryTrait>,
    pub real_estates: Arc<dyn RealEstateRepositoryTrait>,
    pub real_estate_prices: Arc<dyn RealEstatePriceRepositoryTrait>,
    pub fx_snapshots: Arc<dyn FxSnapshotRepositoryTrait>,
    pub debts: Arc<dyn DebtRepositoryTrait>,
    pub recurring_expenses: Arc<dyn RecurringExpenseRepositoryTrait>,
    pub year_goals: Arc<dyn YearGoalRepositoryTrait>,
    pub user_notes: Arc<dyn UserNoteRepositoryTrait>,
    pub users: Arc<dyn UserRepositoryTrait>,
    pub banks: Arc<dyn BankRepositoryTrait>,
    pub quotes: Arc<dyn QuoteSource>,

    pub aggregator: Arc<AggregatorService>,
    pub snapshot_engine: Arc<SnapshotEngine>,
    pub brokerage_service: Arc<BrokerageService>,
    pub transaction_service: Arc<TransactionService>,
    pub metal_service: Arc<MetalService>,

    pub session_gate: Arc<dyn SessionGate>,
    pub account_crypto: Arc<AccountNumberCrypto>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MONETA_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry.with(fmt::layer().json().with_current_span(false)).init();
    } else {
        registry.with(fmt::layer().with_target(true).with_line_number(true)).init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    std::env::set_var("DATABASE_URL", &config.db_path);
    if let Some(parent) = std::path::Path::new(&config.db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let pool = create_pool(&config.db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let wallets = Arc::new(SqliteWalletRepository::new(pool.clone(), writer.clone()));
    let deposit_accounts = Arc::new(SqliteDepositAccountRepository::new(pool.clone(), writer.clone()));
    let transactions = Arc::new(SqliteTransactionRepository::new(pool.clone(), writer.clone()));
    let capital_gains = Arc::new(SqliteCapitalGainRepository::new(writer.clone()));

    let brokerage_accounts = Arc::new(SqliteBrokerageAccountRepository::new(pool.clone()));
    let brokerage_links = Arc::new(SqliteBrokerageDepositLinkRepository::new(pool.clone(), writer.clone()));
    let instruments = Arc::new(SqliteInstrumentRepository::new(pool.clone()));
    let brokerage_events = Arc::new(SqliteBrokerageEventRepository::new(pool.clone(), writer.clone()));
    let holdings = Arc::new(SqliteHoldingRepository::new(pool.clone(), writer.clone()));

    let metal_holdings = Arc::new(SqliteMetalHoldingRepository::new(pool.clone(), writer.clone()));
    let real_estates = Arc::new(SqliteRealEstateRepository::new(pool.clone(), writer.clone()));
    let real_estate_prices = Arc::new(SqliteRealEstatePriceRepository::new(pool.clone(), writer.clone()));
    let fx_snapshots = Arc::new(SqliteFxSnapshotRepository::new(pool.clone(), writer.clone()));

    let debts = Arc::new(SqliteDebtRepository::new(pool.clone(), writer.clone()));
    let recurring_expenses = Arc::new(SqliteRecurringExpenseRepository::new(pool.clone(), writer.clone()));
    let year_goals = Arc::new(SqliteYearGoalRepository::new(pool.clone(), writer.clone()));
    let user_notes = Arc::new(SqliteUserNoteRepository::new(pool.clone(), writer.clone()));

    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let banks = Arc::new(SqliteBankRepository::new(pool.clone()));

    let deposit_snapshots = Arc::new(SqliteDepositAccountSnapshotRepository::new(pool.clone(), writer.clone()));
    let brokerage_snapshots = Arc::new(SqliteBrokerageAccountSnapshotRepository::new(pool.clone(), writer.clone()));
    let metal_snapshots = Arc::new(SqliteMetalHoldingSnapshotRepository::new(pool.clone(), writer.clone()));
    let real_estate_snapshots = Arc::new(SqliteRealEstateSnapshotRepository::new(pool.clone(), writer.clone()));

    let quotes: Arc<dyn QuoteSource> = match &config.market_data_url {
        Some(url) => {
            tracing::info!(market_data_url = %url, "wiring live market-data quote source");
            Arc::new(HttpQuoteSource::new(url.clone(), config.market_data_timeout))
        }
        None => {
            tracing::warn!("no MONETA_MARKET_DATA_URL configured, falling back to NullQuoteSource");
            Arc::new(NullQuoteSource)
        }
    };

    let aggregator = Arc::new(AggregatorService::new(
        wallets.clone(),
        deposit_accounts.clone(),
        transactions.clone(),
        brokerage_accounts.clone(),
        brokerage_links.clone(),
        holdings.clone(),
        instruments.clone(),
        brokerage_events.clone(),
        metal_holdings.clone(),
        real_estates.clone(),
        real_estate_prices.clone(),
        fx_snapshots.clone(),
        quotes.clone(),
        deposit_snapshots.clone(),
        brokerage_snapshots.clone(),
        metal_snapshots.clone(),
        real_estate_snapshots.clone(),
    ));

    let snapshot_engine = Arc::new(SnapshotEngine::new(
        deposit_accounts.clone(),
        brokerage_accounts.clone(),
        brokerage_links.clone(),
        holdings.clone(),
        instruments.clone(),
        metal_holdings.clone(),
        real_estates.clone(),
        real_estate_prices.clone(),
        fx_snapshots.clone(),
        quotes.clone(),
        deposit_snapshots.clone(),
        brokerage_snapshots.clone(),
        metal_snapshots.clone(),
        real_estate_snapshots.clone(),
    ));

    let brokerage_service = Arc::new(BrokerageService::new(
        brokerage_events.clone(),
        holdings.clone(),
        instruments.clone(),
    ));

    let transaction_service = Arc::new(TransactionService::new(
        deposit_accounts.clone(),
        transactions.clone(),
        capital_gains.clone(),
    ));

    let metal_service = Arc::new(MetalService::new(metal_holdings.clone()));

    let session_gate: Arc<dyn SessionGate> = Arc::new(HmacSessionGate::new(config.session_hmac_secret.clone()));
    let account_crypto = Arc::new(AccountNumberCrypto::new(&config.encryption_key, config.hmac_secret.clone()));

    Ok(Arc::new(AppState {
        wallets,
        deposit_accounts,
        transactions,
        capital_gains,
        brokerage_accounts,
        brokerage_links,
        instruments,
        brokerage_events,
        holdings,
        metal_holdings,
        real_estates,
        real_estate_prices,
        fx_snapshots,
        debts,
        recurring_expenses,
        year_goals,
        user_notes,
        users,
        banks,
        quotes,
        aggregator,
        snapshot_engine,
        brokerage_service,
        transaction_service,
        metal_service,
        session_gate,
        account_crypto,
    }))
}
