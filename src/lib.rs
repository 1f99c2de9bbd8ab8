//! Authgate - account authentication service.
//!
//! Email/password authentication with bearer tokens, built around a
//! credential-security pipeline: password policy enforcement, Argon2id
//! hashing, and k-anonymity breach checking.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    AuthError, AuthService, BreachClient, BreachDigest, BreachError, BreachResult, Claims,
    PasswordError, PasswordHasher, PolicyEvaluator, PolicyReport, PolicyViolation, Registration,
    Session, TokenError, TokenIssuer,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{AuthgateError, Result};
pub use web::WebServer;
