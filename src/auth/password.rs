//! Adaptive password hashing and the breach-check digest for Authgate.
//!
//! Uses Argon2id for storage hashes. Hashing and verification are CPU-bound,
//! so both run on `spawn_blocking` workers behind a semaphore sized from the
//! configuration; the async request path never computes a hash inline. A
//! task abandoned by its caller still runs to completion, its result is
//! simply dropped.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use sha1::{Digest, Sha1};
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::config::AuthConfig;

/// Length of the digest prefix revealed to the breach oracle.
pub const BREACH_PREFIX_LEN: usize = 5;

/// Password hashing errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// The configured Argon2 parameters are invalid.
    #[error("invalid argon2 parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// The hashing worker pool failed to run the task.
    #[error("hashing worker unavailable: {0}")]
    Worker(String),
}

/// SHA-1 digest of a password, uppercase hex.
///
/// This is the breach corpus lookup key, deliberately cheap and distinct
/// from the storage hash. Only the first [`BREACH_PREFIX_LEN`] characters
/// ever leave the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachDigest(String);

impl BreachDigest {
    /// Compute the digest of a plaintext password.
    pub fn of(password: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(password.as_bytes());
        Self(hex::encode(hasher.finalize()).to_uppercase())
    }

    /// The full 40-character hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 5-character prefix sent to the breach oracle.
    pub fn prefix(&self) -> &str {
        &self.0[..BREACH_PREFIX_LEN]
    }

    /// The 35-character remainder, compared locally against the oracle's
    /// candidate list.
    pub fn suffix(&self) -> &str {
        &self.0[BREACH_PREFIX_LEN..]
    }
}

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    workers: Arc<Semaphore>,
}

impl PasswordHasher {
    /// Create a hasher from the auth configuration.
    ///
    /// `hash_workers` bounds how many hashes may run concurrently; 0 sizes
    /// the pool to the available CPU cores.
    pub fn new(config: &AuthConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        let workers = if config.hash_workers > 0 {
            config.hash_workers
        } else {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        };

        Ok(Self {
            params,
            workers: Arc::new(Semaphore::new(workers)),
        })
    }

    /// Hash a password using Argon2id with a fresh random salt.
    ///
    /// Returns a PHC-formatted string embedding algorithm, parameters, and
    /// salt, so hashes created under older cost settings keep verifying
    /// after the configuration changes.
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let password = password.to_string();
        let params = self.params.clone();

        self.run(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = argon2_with(params);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| PasswordError::Hash(e.to_string()))
        })
        .await?
    }

    /// Verify a password against a stored hash.
    ///
    /// The algorithm, parameters, and salt come from the stored string; the
    /// comparison is constant-time. A malformed or foreign-format hash is
    /// treated as a mismatch, never an error.
    pub async fn verify(&self, password: &str, stored: &str) -> bool {
        let password = password.to_string();
        let stored = stored.to_string();

        let result = self
            .run(move || match PasswordHash::new(&stored) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            })
            .await;

        match result {
            Ok(matched) => matched,
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }

    /// Hash a batch of independent passwords concurrently.
    ///
    /// Results come back in input order; the worker-pool bound still applies
    /// across the whole batch.
    pub async fn hash_batch(&self, passwords: Vec<String>) -> Result<Vec<String>, PasswordError> {
        let tasks = passwords
            .into_iter()
            .map(|password| {
                let hasher = self.clone();
                async move { hasher.hash(&password).await }
            })
            .collect::<Vec<_>>();

        futures::future::join_all(tasks).await.into_iter().collect()
    }

    /// Run a hashing task on the bounded blocking pool.
    async fn run<T, F>(&self, task: F) -> Result<T, PasswordError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let permit = self
            .workers
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| PasswordError::Worker(e.to_string()))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task()
        })
        .await
        .map_err(|e| PasswordError::Worker(e.to_string()))
    }
}

/// Build the Argon2id hasher for the given parameters.
fn argon2_with(params: Params) -> Argon2<'static> {
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}
