//! SQLite storage implementation for the wallet valuation service.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `moneta-core` and contains:
//! - Database connection pooling and the single-writer mutation actor
//! - Diesel migrations
//! - Repository implementations for every domain entity
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. `moneta-core` stays database-agnostic and works
//! entirely through traits.
//!
//! ```text
//! moneta-core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!    SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod brokerage;
pub mod deposit;
pub mod fx;
pub mod identity;
pub mod metals;
pub mod misc;
pub mod real_estate;
pub mod snapshot;
pub mod wallet;

// Re-export database utilities
pub use db::{create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{not_found_or, IntoCore, StorageError};

// Re-export from moneta-core for convenience
pub use moneta_core::errors::{DatabaseError, Error, Result};
