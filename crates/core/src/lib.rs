//! Moneta core — domain entities, services and the wallet valuation engine.
//!
//! This crate is database-agnostic: it defines the domain model and the
//! `*RepositoryTrait`s that `moneta-storage-sqlite` implements. It also hosts
//! the valuation core itself (FX/quote resolver, holding projector, asset
//! valuators, snapshot engine, aggregator) as pure functions over those
//! traits, so the engine is testable without a database.

pub mod aggregator;
pub mod brokerage;
pub mod constants;
pub mod deposit;
pub mod errors;
pub mod fx;
pub mod identity;
pub mod market_data;
pub mod metals;
pub mod misc;
pub mod money;
pub mod real_estate;
pub mod session;
pub mod snapshot;
pub mod valuation;
pub mod wallet;

pub use errors::{Error, Result};
