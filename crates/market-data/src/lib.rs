//! Quote/instrument contract shared with the external market-data service.
//!
//! The market-data service itself (provider scraping, exchange resolution,
//! rate limiting against upstream APIs) lives outside this workspace. This
//! crate only carries the shapes and the narrow capability trait the wallet
//! service calls against it.

pub mod errors;
pub mod http_client;
pub mod model;
pub mod traits;

pub use errors::MarketDataError;
pub use http_client::{HttpQuoteSource, NullQuoteSource};
pub use model::{DataSource, Quote};
pub use traits::QuoteSource;
