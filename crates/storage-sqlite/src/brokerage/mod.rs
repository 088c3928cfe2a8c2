pub mod model;
pub mod repository;

pub use repository::{
    SqliteBrokerageAccountRepository, SqliteBrokerageDepositLinkRepository, SqliteBrokerageEventRepository,
    SqliteHoldingRepository, SqliteInstrumentRepository,
};
