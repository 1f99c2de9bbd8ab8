//! Error types for Authgate.

use thiserror::Error;

/// Common error type for Authgate.
#[derive(Error, Debug)]
pub enum AuthgateError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the storage
    /// backend. Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// A record violating a uniqueness constraint was rejected by the store.
    #[error("record already exists")]
    Duplicate,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),
}

// Conversion from sqlx errors. Unique-constraint violations keep their
// identity so callers can map them to a duplicate-account outcome.
impl From<sqlx::Error> for AuthgateError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return AuthgateError::Duplicate;
            }
        }
        AuthgateError::Database(e.to_string())
    }
}

/// Result type alias for Authgate operations.
pub type Result<T> = std::result::Result<T, AuthgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_display() {
        let err = AuthgateError::Database("connection lost".to_string());
        assert_eq!(err.to_string(), "database error: connection lost");
    }

    #[test]
    fn test_duplicate_error_display() {
        let err = AuthgateError::Duplicate;
        assert_eq!(err.to_string(), "record already exists");
    }

    #[test]
    fn test_config_error_display() {
        let err = AuthgateError::Config("missing jwt secret".to_string());
        assert_eq!(err.to_string(), "configuration error: missing jwt secret");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = AuthgateError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AuthgateError = io_err.into();
        assert!(matches!(err, AuthgateError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(AuthgateError::Duplicate)
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
