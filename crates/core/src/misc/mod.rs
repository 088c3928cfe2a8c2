pub mod model;
pub mod traits;

pub use model::{Debt, RecurringExpense, UserNote, YearGoal};
pub use traits::{DebtRepositoryTrait, RecurringExpenseRepositoryTrait, UserNoteRepositoryTrait, YearGoalRepositoryTrait};
