//! Middleware for the Web API.

pub mod auth;
pub mod cors;

pub use auth::{attach_token_issuer, AuthUser};
pub use cors::create_cors_layer;
