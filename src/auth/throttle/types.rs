//! Login throttle types

use std::time::Instant;

/// One recorded login attempt
#[derive(Debug, Clone)]
pub struct LoginAttempt {
    /// Origin the attempt is attributed to
    pub origin: String,
    /// When the attempt happened
    pub at: Instant,
    /// Whether the credentials matched
    pub success: bool,
}
