//! Configuration module for Authgate.

use serde::Deserialize;
use std::path::Path;

use crate::{AuthgateError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means permissive (development mode).
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/authgate.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication configuration: token signing and adaptive hashing.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign session tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 time cost (iterations).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 lane count.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Number of blocking workers reserved for hashing. 0 means one per
    /// available CPU core.
    #[serde(default)]
    pub hash_workers: usize,
}

/// Built-in development secret. Startup warns when it is still in use.
pub const DEV_JWT_SECRET: &str = "authgate-dev-secret-change-me";

fn default_jwt_secret() -> String {
    DEV_JWT_SECRET.to_string()
}

fn default_token_expiry() -> u64 {
    3600
}

fn default_argon2_memory() -> u32 {
    65536
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_expiry_secs: default_token_expiry(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            hash_workers: 0,
        }
    }
}

/// Password policy thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// How many of the four character classes (lowercase, uppercase, digit,
    /// symbol) a password must contain.
    #[serde(default = "default_min_char_classes")]
    pub min_char_classes: usize,
    /// Longest allowed run of one repeated character.
    #[serde(default = "default_max_run")]
    pub max_repeat_run: usize,
    /// Longest allowed ascending/descending character sequence.
    #[serde(default = "default_max_run")]
    pub max_sequential_run: usize,
    /// Minimum estimated entropy in bits.
    #[serde(default = "default_min_entropy")]
    pub min_entropy_bits: f64,
}

fn default_min_length() -> usize {
    8
}

fn default_min_char_classes() -> usize {
    3
}

fn default_max_run() -> usize {
    2
}

fn default_min_entropy() -> f64 {
    40.0
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            min_char_classes: default_min_char_classes(),
            max_repeat_run: default_max_run(),
            max_sequential_run: default_max_run(),
            min_entropy_bits: default_min_entropy(),
        }
    }
}

/// Breach oracle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BreachConfig {
    /// Whether breach checking is enabled.
    #[serde(default = "default_breach_enabled")]
    pub enabled: bool,
    /// Base URL of the range query endpoint.
    #[serde(default = "default_breach_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds.
    #[serde(default = "default_breach_timeout")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    #[serde(default = "default_breach_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_breach_enabled() -> bool {
    true
}

fn default_breach_base_url() -> String {
    "https://api.pwnedpasswords.com/range".to_string()
}

fn default_breach_timeout() -> u64 {
    10
}

fn default_breach_connect_timeout() -> u64 {
    5
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            enabled: default_breach_enabled(),
            base_url: default_breach_base_url(),
            timeout_secs: default_breach_timeout(),
            connect_timeout_secs: default_breach_connect_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/authgate.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Web server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token and hashing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Password policy thresholds.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Breach oracle settings.
    #[serde(default)]
    pub breach: BreachConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AuthgateError::Config(e.to_string()))
    }
}
