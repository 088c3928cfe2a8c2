pub mod model;
pub mod traits;

pub use model::{NewWallet, Wallet};
pub use traits::WalletRepositoryTrait;
