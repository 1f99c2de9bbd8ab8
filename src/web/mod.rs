//! Web API module for Authgate.
//!
//! This module provides the REST API surface over the credential pipeline:
//! routing, DTOs, error envelopes, and bearer token middleware.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
