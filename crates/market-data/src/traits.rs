use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::Result;
use crate::model::Quote;

/// Narrow capability interface for the external market-data service (spec §6.3,
/// §9 "duck-typed clients"). The valuation core depends on this trait only,
/// never on a concrete provider, and never calls it more than once per request.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Returns at most one quote per requested symbol. Symbols with no
    /// available quote are simply absent from the map; callers count those
    /// as `missing_quotes` rather than treating an absence as an error.
    async fn get_latest_quotes_for_symbols(&self, symbols: &[String])
        -> Result<HashMap<String, Quote>>;
}
