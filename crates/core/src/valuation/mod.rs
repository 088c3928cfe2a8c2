//! Asset Valuators (spec §4.3): one pure pricing function per asset class,
//! modeled as a sum type rather than an inheritance hierarchy (spec §9). The
//! metal and real-estate valuators build on
//! [`crate::metals`]/[`crate::real_estate::valuator`]; cash and brokerage are
//! defined here since they have no dedicated entity module of their own.

pub mod brokerage;
pub mod cash;
pub mod metal;
pub mod model;
pub mod real_estate;

pub use brokerage::{value_brokerage, BrokerageValuation, PositionInput, PositionValuation};
pub use cash::{value_cash, CashValuation};
pub use metal::{value_metals, MetalItemValuation, MetalValuation};
pub use model::{percentages_of_total, AssetClassKind, AssetClassTotal, Health};
pub use real_estate::{value_real_estates, RealEstateAggregateValuation, RealEstateItemValuation};
