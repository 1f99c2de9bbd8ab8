//! Credential pipeline for Authgate.
//!
//! Composes the policy evaluator, the adaptive hasher, the breach oracle
//! client, the user store, and the token issuer into the registration and
//! login flows. Plaintext passwords live only on the stack of these
//! functions; they are never stored, logged, or placed in errors.

use std::sync::Arc;

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::breach::{BreachClient, BreachError, BreachResult};
use crate::auth::password::{PasswordError, PasswordHasher};
use crate::auth::policy::{PolicyEvaluator, PolicyReport};
use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::db::{Database, NewUser, User, UserRepository};
use crate::AuthgateError;

/// Errors surfaced by the credential pipeline.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The password failed the security policy. Recoverable by the user;
    /// carries the full report for structured feedback.
    #[error("password does not meet the security policy")]
    PolicyViolation(PolicyReport),

    /// An account with this email already exists. Nothing more specific is
    /// revealed.
    #[error("an account with this email already exists")]
    DuplicateIdentity,

    /// Login failed. Deliberately identical for an unknown email and a
    /// wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The breach oracle could not be consulted. Distinct from a clean
    /// result so callers can report "could not check".
    #[error("breach oracle unavailable")]
    OracleUnavailable(#[source] BreachError),

    /// Storage or hash-engine failure. The detail stays in the logs.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PasswordError> for AuthError {
    fn from(e: PasswordError) -> Self {
        AuthError::Internal(e.to_string())
    }
}

/// An authenticated session: a signed token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    /// Signed bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

/// Outcome of a successful registration.
///
/// `breach` is advisory: `None` means the check was disabled or the oracle
/// was unreachable, which is reported as "not checked", never as "clean".
#[derive(Debug, Clone)]
pub struct Registration {
    /// The newly created session.
    pub session: Session,
    /// Breach-corpus annotation, if the check could run.
    pub breach: Option<BreachResult>,
}

/// The credential pipeline.
///
/// One instance is shared across all requests; each request runs
/// independently and the user store arbitrates concurrent registrations via
/// its uniqueness constraint.
pub struct AuthService {
    pool: SqlitePool,
    evaluator: PolicyEvaluator,
    hasher: PasswordHasher,
    breach: Option<BreachClient>,
    issuer: Arc<TokenIssuer>,
    decoy_hash: String,
}

impl AuthService {
    /// Build the pipeline from configuration.
    pub async fn new(config: &Config, db: &Database) -> crate::Result<Self> {
        let evaluator = PolicyEvaluator::new(config.policy.clone());
        let hasher = PasswordHasher::new(&config.auth)
            .map_err(|e| AuthgateError::Config(e.to_string()))?;

        let breach = if config.breach.enabled {
            let client = BreachClient::new(&config.breach)
                .map_err(|e| AuthgateError::Config(e.to_string()))?;
            Some(client)
        } else {
            None
        };

        let issuer = Arc::new(TokenIssuer::new(
            &config.auth.jwt_secret,
            config.auth.token_expiry_secs,
        ));

        // Hashed once at startup so failed lookups can burn the same
        // verification cost as a real mismatch.
        let decoy_hash = hasher
            .hash("authgate-decoy-credential")
            .await
            .map_err(|e| AuthgateError::Config(e.to_string()))?;

        Ok(Self {
            pool: db.pool().clone(),
            evaluator,
            hasher,
            breach,
            issuer,
            decoy_hash,
        })
    }

    /// The token issuer, shared with the web layer for verification.
    pub fn token_issuer(&self) -> Arc<TokenIssuer> {
        self.issuer.clone()
    }

    /// Evaluate a password against the policy without touching any state.
    pub fn analyze_password(&self, password: &str) -> PolicyReport {
        self.evaluator.evaluate(password)
    }

    /// Register a new account.
    ///
    /// Policy rejection happens before the adaptive hash is ever computed.
    /// Duplicate emails are detected at insert time, after hashing, so the
    /// duplicate and success paths cost the same. The breach annotation is
    /// gathered last and never blocks the registration.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Registration, AuthError> {
        let report = self.evaluator.evaluate(password);
        if !report.is_compliant {
            return Err(AuthError::PolicyViolation(report));
        }

        let password_hash = self.hasher.hash(password).await?;

        let repo = UserRepository::new(&self.pool);
        let user = repo
            .create(&NewUser::new(name, email, password_hash))
            .await
            .map_err(|e| match e {
                AuthgateError::Duplicate => AuthError::DuplicateIdentity,
                other => {
                    tracing::error!(error = %other, "user creation failed");
                    AuthError::Internal(other.to_string())
                }
            })?;

        let token = self
            .issuer
            .issue(&user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let breach = self.annotate_breach(password).await;

        info!(user_id = user.id, email = %user.email, "New account registered");

        Ok(Registration {
            session: Session { token, user },
            breach,
        })
    }

    /// Authenticate an existing account.
    ///
    /// An unknown email still verifies against a decoy hash so both failure
    /// paths take the same time, then maps to the same error as a wrong
    /// password.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let repo = UserRepository::new(&self.pool);
        let user = repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = match user {
            Some(user) => user,
            None => {
                let _ = self.hasher.verify(password, &self.decoy_hash).await;
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &user.password).await {
            return Err(AuthError::InvalidCredentials);
        }

        let _ = repo.update_last_login(user.id).await;

        let token = self
            .issuer
            .issue(&user)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        info!(user_id = user.id, email = %user.email, "User logged in");

        Ok(Session { token, user })
    }

    /// Look up a user by ID (for authenticated "who am I" requests).
    pub async fn user_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let repo = UserRepository::new(&self.pool);
        repo.find_by_id(id)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Check a password against the breach corpus.
    ///
    /// Failures are surfaced as [`AuthError::OracleUnavailable`], never
    /// downgraded to a clean result.
    pub async fn check_breach(&self, password: &str) -> Result<BreachResult, AuthError> {
        let client = self
            .breach
            .as_ref()
            .ok_or(AuthError::OracleUnavailable(BreachError::Disabled))?;

        client
            .check(password)
            .await
            .map_err(AuthError::OracleUnavailable)
    }

    /// Run the advisory breach check after registration.
    ///
    /// Returns `None` when the check is disabled or fails; the caller
    /// reports that as "not checked".
    async fn annotate_breach(&self, password: &str) -> Option<BreachResult> {
        let client = self.breach.as_ref()?;
        match client.check(password).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(error = %e, "breach check skipped");
                None
            }
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("breach_enabled", &self.breach.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuthConfig, BreachConfig};

    /// Fast hashing parameters and no breach oracle.
    fn test_config() -> Config {
        Config {
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                argon2_memory_kib: 1024,
                argon2_iterations: 1,
                argon2_parallelism: 1,
                hash_workers: 2,
                ..AuthConfig::default()
            },
            breach: BreachConfig {
                enabled: false,
                ..BreachConfig::default()
            },
            ..Config::default()
        }
    }

    async fn setup() -> (AuthService, Database) {
        let db = Database::open_in_memory().await.unwrap();
        let service = AuthService::new(&test_config(), &db).await.unwrap();
        (service, db)
    }

    #[tokio::test]
    async fn test_register_success() {
        let (service, db) = setup().await;

        let registration = service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        assert!(!registration.session.token.is_empty());
        assert_eq!(registration.session.user.email, "a@example.com");
        // Breach checking disabled: annotation reports "not checked"
        assert!(registration.breach.is_none());

        let repo = UserRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (service, _db) = setup().await;

        let registration = service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        let stored = &registration.session.user.password;
        assert_ne!(stored, "Str0ng&Secret!");
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_policy_rejection_creates_nothing() {
        let (service, db) = setup().await;

        let result = service.register("A", "a@x.com", "Weak").await;
        match result {
            Err(AuthError::PolicyViolation(report)) => {
                assert!(!report.is_compliant);
                assert!(!report.feedback.is_empty());
            }
            other => panic!("expected policy violation, got {other:?}"),
        }

        let repo = UserRepository::new(db.pool());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let (service, _db) = setup().await;

        service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        let result = service
            .register("B", "a@example.com", "Other#Secret9")
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_login_success_issues_verifiable_token() {
        let (service, _db) = setup().await;

        service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        let session = service.login("a@example.com", "Str0ng&Secret!").await.unwrap();

        let claims = service.token_issuer().verify(&session.token).unwrap();
        assert_eq!(claims.sub, session.user.id);
        assert_eq!(claims.email, "a@example.com");

        // Login stamps last_login
        let stored = service.user_by_id(session.user.id).await.unwrap().unwrap();
        assert!(stored.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (service, _db) = setup().await;

        service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        let result = service.login("a@example.com", "Wrong#Secret9").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let (service, _db) = setup().await;

        let result = service.login("missing@example.com", "whatever").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_check_breach_disabled_is_unavailable() {
        let (service, _db) = setup().await;

        let result = service.check_breach("password").await;
        assert!(matches!(
            result,
            Err(AuthError::OracleUnavailable(BreachError::Disabled))
        ));
    }

    #[tokio::test]
    async fn test_user_by_id() {
        let (service, _db) = setup().await;

        let registration = service
            .register("A", "a@example.com", "Str0ng&Secret!")
            .await
            .unwrap();

        let user = service
            .user_by_id(registration.session.user.id)
            .await
            .unwrap();
        assert_eq!(user.unwrap().email, "a@example.com");

        let missing = service.user_by_id(99).await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_auth_error_messages_carry_no_detail() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
        assert_eq!(
            AuthError::DuplicateIdentity.to_string(),
            "an account with this email already exists"
        );
    }
}
