//! Authentication configuration

use crate::utils::error::{Result, SecurityError};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Authentication and login throttling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret; rotating it invalidates all outstanding tokens
    #[serde(default = "generate_secure_jwt_secret")]
    pub jwt_secret: String,
    /// Token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Failed attempts per origin before lockout
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: u32,
    /// Trailing window over which failed attempts are counted, in seconds
    #[serde(default = "default_lockout_window_secs")]
    pub lockout_window_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_secure_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            max_login_attempts: default_max_login_attempts(),
            lockout_window_secs: default_lockout_window_secs(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < 32 {
            return Err(SecurityError::config(
                "JWT secret must be at least 32 characters long",
            ));
        }

        if self.jwt_secret == "your-secret-key" || self.jwt_secret == "change-me" {
            return Err(SecurityError::config(
                "JWT secret must not use a placeholder value",
            ));
        }

        if self.jwt_expiration == 0 {
            return Err(SecurityError::config("JWT expiration must be non-zero"));
        }

        if self.max_login_attempts == 0 {
            return Err(SecurityError::config(
                "max_login_attempts must be at least 1",
            ));
        }

        if self.lockout_window_secs == 0 {
            return Err(SecurityError::config(
                "lockout_window_secs must be non-zero",
            ));
        }

        Ok(())
    }
}

fn default_jwt_expiration() -> u64 {
    86_400
}

fn default_max_login_attempts() -> u32 {
    5
}

fn default_lockout_window_secs() -> u64 {
    15 * 60
}

/// Generate a secure random JWT secret
fn generate_secure_jwt_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_is_strong_enough() {
        let config = AuthConfig::default();
        assert!(config.jwt_secret.len() >= 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_short_secret() {
        let config = AuthConfig {
            jwt_secret: "short".to_string(),
            ..AuthConfig::default()
        };
        assert!(matches!(config.validate(), Err(SecurityError::Config(_))));
    }

    #[test]
    fn test_rejects_placeholder_secret() {
        let config = AuthConfig {
            jwt_secret: "your-secret-key".to_string(),
            ..AuthConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_match_policy() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_expiration, 86_400);
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.lockout_window_secs, 900);
    }
}
