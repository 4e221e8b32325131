// src/error.rs

use thiserror::Error;

/// Global Application Error Enum.
/// Centralizes error handling for the store, the service layer and the CLI.
///
/// `QuestionRecord` itself never produces one of these; they come from the
/// collaborators around it (validation, repositories, configuration).
#[derive(Debug, Error)]
pub enum AppError {
    /// A question with the requested id does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An explicit id collided with an already persisted question.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Input rejected by validation or parsing.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or malformed environment configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Converts `sqlx::Error` into an `AppError`.
/// Unique violations surface as `Conflict` so explicit-id inserts can be told apart.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::Conflict(db_err.message().to_string());
            }
        }
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("migration failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
