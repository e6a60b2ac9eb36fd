//! Configuration for the security core
//!
//! Config structs deserialize from the host application's settings file
//! and can also be assembled from environment variables at startup.

mod audit;
mod auth;
mod loader;

pub use audit::AuditConfig;
pub use auth::AuthConfig;

use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Root configuration for the security core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Authentication and throttling configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Audit log configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl SecurityConfig {
    /// Build a configuration from environment variables
    ///
    /// Reads a `.env` file when present, then applies `JWT_SECRET`,
    /// `JWT_EXPIRATION`, `MAX_LOGIN_ATTEMPTS`, `LOGIN_LOCKOUT_SECS`,
    /// and `SECURITY_LOG_DIR` on top of the defaults.
    pub fn from_env() -> Result<Self> {
        loader::from_env()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.auth.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SecurityConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserializes_with_partial_fields() {
        let config: SecurityConfig = serde_json::from_str(
            r#"{"auth": {"jwt_secret": "0123456789abcdef0123456789abcdef", "jwt_expiration": 3600}}"#,
        )
        .unwrap();

        assert_eq!(config.auth.jwt_expiration, 3600);
        assert_eq!(config.auth.max_login_attempts, 5);
        assert_eq!(config.audit.days_to_keep, 30);
    }
}
