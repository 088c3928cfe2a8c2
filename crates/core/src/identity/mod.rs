pub mod model;
pub mod traits;

pub use model::{Bank, User};
pub use traits::{BankRepositoryTrait, UserRepositoryTrait};
