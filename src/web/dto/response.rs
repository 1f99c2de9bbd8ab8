//! Response DTOs for the Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{BreachResult, PolicyReport, Registration, Session};
use crate::db::User;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// User information in responses. The password hash never leaves the store
/// layer.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Breach-corpus annotation.
#[derive(Debug, Serialize, ToSchema)]
pub struct BreachReport {
    /// Whether the password appears in the corpus.
    pub breached: bool,
    /// How many times it was seen in known breaches.
    pub count: u64,
}

impl From<BreachResult> for BreachReport {
    fn from(result: BreachResult) -> Self {
        Self {
            breached: result.breached,
            count: result.count,
        }
    }
}

/// Registration response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Session token (JWT).
    pub token: String,
    /// Token expiry in seconds.
    pub expires_in: u64,
    /// The created user.
    pub user: UserInfo,
    /// Breach annotation; `null` means the check could not run, not that
    /// the password is clean.
    pub breach: Option<BreachReport>,
}

impl RegisterResponse {
    /// Build from a pipeline registration outcome.
    pub fn from_registration(registration: &Registration, expires_in: u64) -> Self {
        Self {
            token: registration.session.token.clone(),
            expires_in,
            user: UserInfo::from(&registration.session.user),
            breach: registration.breach.map(BreachReport::from),
        }
    }
}

/// Login response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Session token (JWT).
    pub token: String,
    /// Token expiry in seconds.
    pub expires_in: u64,
    /// The authenticated user.
    pub user: UserInfo,
}

impl LoginResponse {
    /// Build from a pipeline session.
    pub fn from_session(session: &Session, expires_in: u64) -> Self {
        Self {
            token: session.token.clone(),
            expires_in,
            user: UserInfo::from(&session.user),
        }
    }
}

/// Current user response (for /api/auth/me).
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl From<&User> for MeResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
            last_login_at: user.last_login.clone(),
        }
    }
}

/// Password analysis response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// True only if every policy rule passed.
    pub is_compliant: bool,
    /// Advisory strength score in 0..=100.
    pub score: u32,
    /// Estimated entropy in bits.
    pub entropy_bits: f64,
    /// One message per failed rule, in rule order.
    pub feedback: Vec<String>,
}

impl From<PolicyReport> for AnalyzeResponse {
    fn from(report: PolicyReport) -> Self {
        Self {
            is_compliant: report.is_compliant,
            score: report.score,
            entropy_bits: report.entropy_bits,
            feedback: report.feedback.iter().map(|v| v.to_string()).collect(),
        }
    }
}
