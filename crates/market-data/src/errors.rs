use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("unreachable: {0}")]
    Unreachable(String),
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),
    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, MarketDataError>;
