//! User model for Authgate.

/// User entity representing a registered account.
///
/// `password` holds the Argon2id PHC hash; the plaintext never reaches this
/// type.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account email (unique, case-insensitive).
    pub email: String,
    /// Password hash (Argon2id PHC string).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last login timestamp (optional).
    pub last_login: Option<String>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Password hash (must be pre-hashed).
    pub password: String,
}

impl NewUser {
    /// Create a new user record from its fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}
