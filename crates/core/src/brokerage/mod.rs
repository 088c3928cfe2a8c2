pub mod model;
pub mod projector;
pub mod service;
pub mod traits;

pub use model::{
    BrokerageAccount, BrokerageDepositLink, BrokerageEvent, BrokerageEventType, Holding,
    Instrument, InstrumentType, NewBrokerageEvent,
};
pub use projector::{HoldingState, ProjectedStep};
pub use service::BrokerageService;
pub use traits::{
    BrokerageAccountRepositoryTrait, BrokerageDepositLinkRepositoryTrait, BrokerageEventRepositoryTrait,
    HoldingRepositoryTrait, InstrumentRepositoryTrait,
};
