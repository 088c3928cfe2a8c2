//! Re-export of the market-data contract crate so the rest of `moneta-core`
//! depends on one name. The market-data service's own internals (provider
//! selection, scraping, exchange resolution) are out of scope (spec §6.3).

pub use moneta_market_data::{DataSource, MarketDataError, Quote, QuoteSource};
