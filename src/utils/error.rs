//! Error types for the security core

use thiserror::Error;

/// Result type alias for the security core
pub type Result<T> = std::result::Result<T, SecurityError>;

/// Main error type for the security core
#[derive(Error, Debug)]
pub enum SecurityError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// Password comparison errors (malformed stored hash)
    #[error("Password comparison failed: {0}")]
    Comparison(String),

    /// Token errors (bad signature, malformed, expired)
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// Token refresh errors
    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    /// Attempted mutation of a protected role
    #[error("Protected role: {0}")]
    ProtectedRole(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper functions for creating specific errors
impl SecurityError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn hashing<S: Into<String>>(message: S) -> Self {
        Self::Hashing(message.into())
    }

    pub fn comparison<S: Into<String>>(message: S) -> Self {
        Self::Comparison(message.into())
    }

    pub fn token_refresh<S: Into<String>>(message: S) -> Self {
        Self::TokenRefresh(message.into())
    }

    pub fn protected_role<S: Into<String>>(message: S) -> Self {
        Self::ProtectedRole(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}
