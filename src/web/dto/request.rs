//! Request DTOs for the Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// User registration request.
///
/// Field validation here covers shape only (lengths, email format); password
/// strength is the policy evaluator's job.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 60, message = "Name must be 1-60 characters"))]
    pub name: String,
    /// Account email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,
}

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Password check request (analysis or breach lookup).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordCheckRequest {
    /// Candidate password. Analyzed transiently, never stored.
    #[validate(length(max = 512, message = "Password must be at most 512 characters"))]
    pub password: String,
}
