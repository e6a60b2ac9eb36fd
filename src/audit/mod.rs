//! Security audit logging
//!
//! Append-only JSON-lines log of authentication, access, and suspicious
//! events, partitioned per category per UTC day, with a sliding-window
//! anomaly detector and search/metrics over the persisted files.
//!
//! All file I/O here is best-effort: a failed write is reported to the
//! critical sink and never fails the operation that triggered it.

mod logger;
mod search;
pub mod types;


pub use types::{
    AuthAction, LogCategory, LogFilters, OriginCount, SecurityLogEntry, SecurityMetrics, Severity,
};

use crate::config::AuditConfig;
use crate::utils::error::Result;
use crate::utils::sink::CriticalSink;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use types::ActivityRecord;

/// File-backed security audit log
pub struct SecurityAuditLog {
    /// Directory holding one subdirectory per category
    log_dir: PathBuf,
    /// Suspicious events per origin that trigger a critical escalation
    suspicious_threshold: usize,
    /// Sliding window for the anomaly detector
    suspicious_window: Duration,
    /// Recent suspicious activity per origin
    suspicious: RwLock<HashMap<String, Vec<ActivityRecord>>>,
    /// Critical-event sink
    sink: Arc<dyn CriticalSink>,
}

impl SecurityAuditLog {
    /// Create an audit log rooted at the configured directory
    ///
    /// Ensures the per-category subdirectories exist.
    pub fn new(config: &AuditConfig, sink: Arc<dyn CriticalSink>) -> Result<Self> {
        for category in LogCategory::ALL {
            std::fs::create_dir_all(config.log_dir.join(category.as_str()))?;
        }

        Ok(Self {
            log_dir: config.log_dir.clone(),
            suspicious_threshold: config.suspicious_threshold,
            suspicious_window: Duration::from_secs(config.suspicious_window_secs),
            suspicious: RwLock::new(HashMap::new()),
            sink,
        })
    }
}
