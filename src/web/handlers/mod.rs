//! API handlers for the Web API.

pub mod auth;
pub mod password;

pub use auth::{login, me, register, AppState};
pub use password::{analyze, breach};
