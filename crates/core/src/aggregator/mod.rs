pub mod model;
pub mod service;

pub use model::{
    BrokerageAccountSection, DepositAccountSection, MetalsSection, MonthBreakdown, RealEstateSection, WalletTree,
};
pub use service::AggregatorService;
