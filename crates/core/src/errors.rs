use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The error taxonomy of the wallet service (spec §7). Each variant maps to
/// an HTTP status at the server boundary; core code never performs that
/// mapping itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("unauthenticated or cross-user access")]
    Auth(String),

    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("dependency unavailable: {0}")]
    DependencyUnavailable(String),

    #[error("transient failure, safe to retry: {0}")]
    Transient(String),

    #[error("fatal: {0}")]
    Fatal(String),

    #[error("database: {0}")]
    Database(#[from] DatabaseError),
}

/// Errors surfaced by the storage layer before being folded into [`Error`].
/// `moneta-storage-sqlite` owns its own richer `StorageError` and converts
/// into this narrower set at the trait boundary.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("invalid month key: {0}")]
    InvalidMonthKey(String),
    #[error("{account_id}: insufficient quantity to sell {requested}, holding {available}")]
    InsufficientQuantity {
        account_id: String,
        requested: String,
        available: String,
    },
    #[error("transaction would drive balance negative on account {account_id}")]
    NegativeBalance { account_id: String },
    #[error("currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch { expected: String, actual: String },
    #[error("brokerage deposit link already exists for currency {currency}")]
    DuplicateCurrencyLink { currency: String },
    #[error("event date {0} out of order for its position")]
    EventOutOfOrder(NaiveDate),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<Error> for String {
    fn from(e: Error) -> Self {
        e.to_string()
    }
}
