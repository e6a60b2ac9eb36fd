//! Environment-based configuration loading

use super::SecurityConfig;
use crate::utils::error::{Result, SecurityError};
use std::env;
use std::path::PathBuf;
use tracing::debug;

/// Assemble a configuration from environment variables on top of defaults
pub(super) fn from_env() -> Result<SecurityConfig> {
    // Best-effort: a missing .env file is not an error
    let _ = dotenvy::dotenv();

    let mut config = SecurityConfig::default();

    if let Ok(secret) = env::var("JWT_SECRET") {
        config.auth.jwt_secret = secret;
    }

    if let Some(expiration) = parse_var::<u64>("JWT_EXPIRATION")? {
        config.auth.jwt_expiration = expiration;
    }

    if let Some(max_attempts) = parse_var::<u32>("MAX_LOGIN_ATTEMPTS")? {
        config.auth.max_login_attempts = max_attempts;
    }

    if let Some(window) = parse_var::<u64>("LOGIN_LOCKOUT_SECS")? {
        config.auth.lockout_window_secs = window;
    }

    if let Ok(dir) = env::var("SECURITY_LOG_DIR") {
        config.audit.log_dir = PathBuf::from(dir);
    }

    config.validate()?;
    debug!("Security configuration loaded from environment");
    Ok(config)
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| SecurityError::config(format!("Invalid value for {}: {}", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_absent_is_none() {
        let parsed: Option<u64> = parse_var("ESTATE_SECURITY_UNSET_VAR").unwrap();
        assert!(parsed.is_none());
    }
}
