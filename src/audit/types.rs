//! Audit log types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

/// Audit log category; each category is persisted in its own
/// subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    Auth,
    Access,
    Suspicious,
    Error,
}

impl LogCategory {
    /// Every category, in a fixed order
    pub const ALL: [LogCategory; 4] = [
        LogCategory::Auth,
        LogCategory::Access,
        LogCategory::Suspicious,
        LogCategory::Error,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Access => "access",
            Self::Suspicious => "suspicious",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Criticality tag on an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication event kinds for typed auth entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthAction {
    Login,
    Logout,
    FailedLogin,
    PasswordReset,
    TokenRefresh,
}

impl AuthAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::FailedLogin => "failed_login",
            Self::PasswordReset => "password_reset",
            Self::TokenRefresh => "token_refresh",
        }
    }
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One audit log record; never mutated after being written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityLogEntry {
    /// Log category
    #[serde(rename = "type")]
    pub category: LogCategory,
    /// Severity
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Free-form detail payload
    #[serde(default)]
    pub details: serde_json::Value,
    /// Subject the event is about, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    /// Origin the event is attributed to, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Stamped when the entry is logged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// In-memory filters applied on top of the date range when searching
#[derive(Debug, Clone, Default)]
pub struct LogFilters {
    pub severity: Option<Severity>,
    pub subject_id: Option<String>,
    pub origin: Option<String>,
    /// Substring match against the serialized entry
    pub keyword: Option<String>,
}

impl LogFilters {
    /// Whether an entry passes every set filter
    pub fn matches(&self, entry: &SecurityLogEntry) -> bool {
        if let Some(severity) = self.severity {
            if entry.severity != severity {
                return false;
            }
        }
        if let Some(subject_id) = &self.subject_id {
            if entry.subject_id.as_deref() != Some(subject_id.as_str()) {
                return false;
            }
        }
        if let Some(origin) = &self.origin {
            if entry.origin.as_deref() != Some(origin.as_str()) {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            let serialized = serde_json::to_string(entry).unwrap_or_default();
            if !serialized.contains(keyword.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Suspicious-event count for one origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginCount {
    pub origin: String,
    pub count: usize,
}

/// Aggregated view over a date range, derived entirely from the log
/// files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityMetrics {
    pub total_auth_attempts: usize,
    pub failed_logins: usize,
    pub access_denials: usize,
    pub suspicious_activities: usize,
    /// Top origins by suspicious-event count, at most ten
    pub top_suspicious_origins: Vec<OriginCount>,
    /// Entry counts per severity
    pub severity_breakdown: HashMap<String, usize>,
}

/// One tracked suspicious activity, used only by the anomaly detector
#[derive(Debug, Clone)]
pub(super) struct ActivityRecord {
    pub at: Instant,
    pub activity_type: String,
}
