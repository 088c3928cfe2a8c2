pub mod crypto;
pub mod model;
pub mod service;
pub mod traits;

pub use model::{
    AccountType, CapitalGain, CapitalGainKind, DepositAccount, DepositAccountBalance, NewDepositAccount,
    NewTransactionRow, Transaction, TransactionStatus,
};
pub use service::TransactionService;
pub use traits::{CapitalGainRepositoryTrait, DepositAccountRepositoryTrait, TransactionRepositoryTrait};
