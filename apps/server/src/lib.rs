pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod session_mw;

pub use main_lib::{build_state, init_tracing, AppState};
