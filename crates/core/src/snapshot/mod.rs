pub mod engine;
pub mod model;
pub mod traits;

pub use engine::{validate_month_key, SnapshotEngine};
pub use model::{
    BrokerageAccountMonthlySnapshot, DepositAccountMonthlySnapshot, MetalHoldingMonthlySnapshot,
    RealEstateMonthlySnapshot, SnapshotSummary,
};
pub use traits::{
    BrokerageAccountSnapshotRepositoryTrait, DepositAccountSnapshotRepositoryTrait,
    MetalHoldingSnapshotRepositoryTrait, RealEstateSnapshotRepositoryTrait,
};
