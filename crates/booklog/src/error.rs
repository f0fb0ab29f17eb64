//! Application-wide error types using thiserror.

use booklog_common::BooklogError;
use booklog_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A pipeline stage failed.
    #[error(transparent)]
    Booklog(#[from] BooklogError),
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
