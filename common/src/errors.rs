// Error handling framework

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),
}

/// Database-specific errors
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Database health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Query execution failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate key violation: {0}")]
    DuplicateKey(String),

    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),
}

/// Errors surfaced by the scheduling service (never by the engine itself,
/// which is total over well-formed inputs)
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Project not found or access denied")]
    AccessDenied,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                // Postgres constraint violation classes
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateKey(message),
                    Some("23503") => DatabaseError::ForeignKeyViolation(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_denied_message_hides_existence() {
        let err = SchedulerError::AccessDenied;
        assert_eq!(err.to_string(), "Project not found or access denied");
    }

    #[test]
    fn test_database_error_wraps_into_scheduler_error() {
        let err: SchedulerError = DatabaseError::NotFound("task 42".to_string()).into();
        assert!(matches!(err, SchedulerError::Database(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DatabaseError::NotFound(_)));
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
        assert_eq!(AuthError::TokenExpired.to_string(), "Token expired");
    }
}
