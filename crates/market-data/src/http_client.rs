//! Thin HTTP client against the external market-data service's batch quote
//! endpoint. The service's own provider selection, scraping and exchange
//! resolution live outside this workspace (spec §6.3); this module only
//! carries the one call the valuation core makes: a single batched
//! `get_latest_quotes_for_symbols`.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{MarketDataError, Result};
use crate::model::Quote;
use crate::traits::QuoteSource;

/// Calls `GET {base_url}/quotes?symbols=a,b,c` and expects a JSON array of
/// [`Quote`] back. Symbols absent from the response are simply missing from
/// the returned map, never synthesized (spec §4.1).
pub struct HttpQuoteSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpQuoteSource {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client configuration is valid");
        Self { client, base_url }
    }
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
    async fn get_latest_quotes_for_symbols(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }
        let url = format!("{}/quotes", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("symbols", symbols.join(","))])
            .send()
            .await
            .map_err(|e| MarketDataError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MarketDataError::Provider(format!("market-data service returned {}", response.status())));
        }

        let quotes: Vec<Quote> = response
            .json()
            .await
            .map_err(|e| MarketDataError::Provider(format!("malformed quote response: {e}")))?;

        Ok(quotes.into_iter().map(|q| (q.symbol.clone(), q)).collect())
    }
}

/// Returns no quotes for any symbol. Every holding falls back to cost basis
/// and is counted as `missing_quotes`; used when no market-data endpoint is
/// configured (spec §7 `DependencyUnavailable` degrades rather than fails).
pub struct NullQuoteSource;

#[async_trait]
impl QuoteSource for NullQuoteSource {
    async fn get_latest_quotes_for_symbols(&self, _symbols: &[String]) -> Result<HashMap<String, Quote>> {
        Ok(HashMap::new())
    }
}
