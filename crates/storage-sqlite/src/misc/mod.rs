pub mod model;
pub mod repository;

pub use repository::{
    SqliteDebtRepository, SqliteRecurringExpenseRepository, SqliteUserNoteRepository, SqliteYearGoalRepository,
};
