//! Login attempt throttling
//!
//! Sliding-window brute-force protection keyed by origin. Histories are
//! pruned lazily on write; no background timer.

pub mod types;


pub use types::LoginAttempt;

use crate::config::AuthConfig;
use crate::utils::sink::CriticalSink;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Per-origin login attempt ledger with a trailing lockout window
pub struct LoginThrottle {
    /// Failed attempts per origin before lockout
    max_attempts: u32,
    /// Trailing window over which failed attempts are counted
    lockout_window: Duration,
    /// Attempt history per origin
    attempts: RwLock<HashMap<String, Vec<LoginAttempt>>>,
    /// Sink for repeated-failure reports
    sink: Arc<dyn CriticalSink>,
}

impl LoginThrottle {
    /// Create a new throttle from the authentication configuration
    pub fn new(config: &AuthConfig, sink: Arc<dyn CriticalSink>) -> Self {
        Self {
            max_attempts: config.max_login_attempts,
            lockout_window: Duration::from_secs(config.lockout_window_secs),
            attempts: RwLock::new(HashMap::new()),
            sink,
        }
    }

    /// Whether a new login attempt from this origin is allowed
    ///
    /// True iff the failed attempts within the trailing lockout window
    /// number strictly less than the configured maximum.
    pub async fn is_allowed(&self, origin: &str) -> bool {
        let attempts = self.attempts.read().await;
        let Some(history) = attempts.get(origin) else {
            return true;
        };

        let now = Instant::now();
        let recent_failures = history
            .iter()
            .filter(|attempt| !attempt.success && now - attempt.at < self.lockout_window)
            .count();

        (recent_failures as u32) < self.max_attempts
    }

    /// Record the outcome of a login attempt
    ///
    /// Prunes entries older than the lockout window before appending.
    /// Failures are additionally reported to the sink with the running
    /// failed-count for the origin.
    pub async fn record_attempt(&self, origin: &str, success: bool) {
        let failed_count = {
            let mut attempts = self.attempts.write().await;
            let history = attempts.entry(origin.to_string()).or_default();

            let now = Instant::now();
            history.retain(|attempt| now - attempt.at < self.lockout_window);
            history.push(LoginAttempt {
                origin: origin.to_string(),
                at: now,
                success,
            });

            if success {
                None
            } else {
                Some(history.iter().filter(|a| !a.success).count())
            }
        };

        if let Some(count) = failed_count {
            self.sink.report(
                "Failed login attempt",
                json!({
                    "origin": origin,
                    "timestamp": Utc::now().to_rfc3339(),
                    "attempt_count": count,
                }),
            );
        }
    }

    /// Prune all origins' histories to the given retention window
    ///
    /// Origins left with no attempts are removed from the map. Intended
    /// to run on idle or teardown, not per request.
    pub async fn cleanup(&self, max_age: Duration) {
        let mut attempts = self.attempts.write().await;
        let now = Instant::now();

        attempts.retain(|_, history| {
            history.retain(|attempt| now - attempt.at < max_age);
            !history.is_empty()
        });

        debug!("Login throttle cleanup done, {} origins kept", attempts.len());
    }

    /// Number of origins currently tracked
    pub async fn tracked_origins(&self) -> usize {
        self.attempts.read().await.len()
    }
}
