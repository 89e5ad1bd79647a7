/// Application error type shared by the harness and the promotion utility
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // User store errors
    #[error("Database error: {0}")]
    Database(String),

    // Report persistence errors
    #[error("Report write failed: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
