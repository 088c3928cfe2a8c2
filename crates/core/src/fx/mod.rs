pub mod model;
pub mod traits;

pub use model::FxMonthlySnapshot;
pub use traits::{FxSnapshotRepositoryTrait, FxSource};
