pub mod model;
pub mod repository;

pub use repository::{
    SqliteBrokerageAccountSnapshotRepository, SqliteDepositAccountSnapshotRepository,
    SqliteMetalHoldingSnapshotRepository, SqliteRealEstateSnapshotRepository,
};
