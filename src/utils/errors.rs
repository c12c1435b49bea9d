//! Error handling for FestHub
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the FestHub application
#[derive(Error, Debug)]
pub enum FestHubError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Star not found for user {user_id} on event {event_id}")]
    StarNotFound { user_id: Uuid, event_id: Uuid },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Object storage specific errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Storage request failed: {0}")]
    RequestFailed(String),

    #[error("Storage request timed out")]
    Timeout,

    #[error("Invalid storage response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for FestHub operations
pub type Result<T> = std::result::Result<T, FestHubError>;

/// Result type alias for object storage operations
pub type UploadResult<T> = std::result::Result<T, UploadError>;

impl FestHubError {
    /// Check if the error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        match self {
            FestHubError::Database(_) => false,
            FestHubError::Migration(_) => false,
            FestHubError::Http(_) => true,
            FestHubError::Upload(_) => true,
            FestHubError::Config(_) => false,
            FestHubError::Validation(_) => true,
            FestHubError::Authorization(_) => false,
            FestHubError::Authentication(_) => false,
            FestHubError::Conflict(_) => true,
            FestHubError::UserNotFound { .. } => false,
            FestHubError::EventNotFound { .. } => false,
            FestHubError::StarNotFound { .. } => false,
            FestHubError::InvalidStateTransition { .. } => false,
            FestHubError::Token(_) => false,
            FestHubError::Serialization(_) => false,
            FestHubError::Io(_) => true,
            FestHubError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FestHubError::Database(_) => ErrorSeverity::Critical,
            FestHubError::Migration(_) => ErrorSeverity::Critical,
            FestHubError::Config(_) => ErrorSeverity::Critical,
            FestHubError::Authorization(_) => ErrorSeverity::Warning,
            FestHubError::Authentication(_) => ErrorSeverity::Warning,
            FestHubError::Conflict(_) => ErrorSeverity::Warning,
            FestHubError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
