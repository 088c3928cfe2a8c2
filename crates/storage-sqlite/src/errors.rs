//! Storage-specific error types, converted to `moneta_core::Error` at the
//! trait boundary (spec §7: the core's `DatabaseError` is deliberately
//! narrower than what Diesel/r2d2 can raise).

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use moneta_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("migration failed: {0}")]
    MigrationFailed(String),

    #[error("core error: {0}")]
    CoreError(String),
}

impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => Error::Database(DatabaseError::ConnectionFailed(e.to_string())),
            StorageError::PoolError(e) => Error::Database(DatabaseError::ConnectionFailed(e.to_string())),
            StorageError::QueryFailed(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)) => {
                Error::Database(DatabaseError::UniqueViolation(info.message().to_string()))
            }
            StorageError::QueryFailed(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            StorageError::CoreError(e) => Error::Database(DatabaseError::QueryFailed(e)),
        }
    }
}

/// Looks up `diesel::result::Error::NotFound` and turns it into the core's
/// named `Error::NotFound(entity, id)`, falling back to the generic query
/// error mapping for everything else.
pub fn not_found_or(err: DieselError, entity: &'static str, id: &str) -> Error {
    match err {
        DieselError::NotFound => Error::NotFound(entity, id.to_string()),
        other => StorageError::from(other).into(),
    }
}

pub trait IntoCore<T> {
    fn into_core(self) -> moneta_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> moneta_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> moneta_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
