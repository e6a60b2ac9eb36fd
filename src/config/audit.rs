//! Audit log configuration

use crate::utils::error::{Result, SecurityError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Security audit log configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Directory holding one subdirectory per log category
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Log file retention in days
    #[serde(default = "default_days_to_keep")]
    pub days_to_keep: u32,
    /// Suspicious events per origin that trigger a critical escalation
    #[serde(default = "default_suspicious_threshold")]
    pub suspicious_threshold: usize,
    /// Sliding window for the anomaly detector, in seconds
    #[serde(default = "default_suspicious_window_secs")]
    pub suspicious_window_secs: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            days_to_keep: default_days_to_keep(),
            suspicious_threshold: default_suspicious_threshold(),
            suspicious_window_secs: default_suspicious_window_secs(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.log_dir.as_os_str().is_empty() {
            return Err(SecurityError::config("audit log_dir must not be empty"));
        }

        if self.suspicious_threshold == 0 {
            return Err(SecurityError::config(
                "suspicious_threshold must be at least 1",
            ));
        }

        if self.suspicious_window_secs == 0 {
            return Err(SecurityError::config(
                "suspicious_window_secs must be non-zero",
            ));
        }

        Ok(())
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs/security")
}

fn default_days_to_keep() -> u32 {
    30
}

fn default_suspicious_threshold() -> usize {
    5
}

fn default_suspicious_window_secs() -> u64 {
    5 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let config = AuditConfig::default();
        assert_eq!(config.days_to_keep, 30);
        assert_eq!(config.suspicious_threshold, 5);
        assert_eq!(config.suspicious_window_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let config = AuditConfig {
            suspicious_threshold: 0,
            ..AuditConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
