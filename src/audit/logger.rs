//! Entry writing, typed constructors, and the anomaly detector

use super::types::{
    ActivityRecord, AuthAction, LogCategory, SecurityLogEntry, Severity,
};
use super::SecurityAuditLog;
use crate::utils::error::Result;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tracing::warn;

impl SecurityAuditLog {
    /// Append one entry to its category's file for the current UTC day
    ///
    /// Critical entries are additionally forwarded to the sink.
    /// Suspicious entries bearing an origin feed the anomaly detector,
    /// which may append one extra critical entry summarizing a burst —
    /// an escalation, never a gate.
    pub async fn log(&self, entry: SecurityLogEntry) {
        let entry = stamped(entry);
        self.persist(&entry).await;

        if entry.category == LogCategory::Suspicious {
            if let Some(origin) = entry.origin.clone() {
                let activity_type = entry
                    .details
                    .get("activity_type")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string();

                if let Some(burst) = self.track_suspicious(&origin, activity_type).await {
                    self.persist(&stamped(burst)).await;
                }
            }
        }
    }

    /// Log an authentication event
    pub async fn log_auth_event(
        &self,
        subject_id: &str,
        origin: &str,
        action: AuthAction,
        success: bool,
        details: Option<serde_json::Value>,
    ) {
        let entry = SecurityLogEntry {
            category: LogCategory::Auth,
            severity: if success {
                Severity::Info
            } else {
                Severity::Warning
            },
            message: format!(
                "Authentication {} - {}",
                action,
                if success { "Success" } else { "Failed" }
            ),
            details: merge_details(
                json!({ "action": action.as_str(), "success": success }),
                details,
            ),
            subject_id: Some(subject_id.to_string()),
            origin: Some(origin.to_string()),
            timestamp: None,
        };

        self.log(entry).await;
    }

    /// Log an access-control decision
    pub async fn log_access_event(
        &self,
        subject_id: &str,
        origin: &str,
        resource: &str,
        action: &str,
        success: bool,
        details: Option<serde_json::Value>,
    ) {
        let entry = SecurityLogEntry {
            category: LogCategory::Access,
            severity: if success {
                Severity::Info
            } else {
                Severity::Warning
            },
            message: format!(
                "Access {} to {} - {}",
                action,
                resource,
                if success { "Granted" } else { "Denied" }
            ),
            details: merge_details(
                json!({ "resource": resource, "action": action, "success": success }),
                details,
            ),
            subject_id: Some(subject_id.to_string()),
            origin: Some(origin.to_string()),
            timestamp: None,
        };

        self.log(entry).await;
    }

    /// Log a suspicious activity observation
    pub async fn log_suspicious_activity(
        &self,
        origin: &str,
        activity_type: &str,
        severity: Severity,
        details: Option<serde_json::Value>,
    ) {
        let entry = SecurityLogEntry {
            category: LogCategory::Suspicious,
            severity,
            message: format!("Suspicious activity detected: {}", activity_type),
            details: merge_details(json!({ "activity_type": activity_type }), details),
            subject_id: None,
            origin: Some(origin.to_string()),
            timestamp: None,
        };

        self.log(entry).await;
    }

    /// Write an entry to disk and forward critical entries to the sink
    ///
    /// Best-effort: write failures are reported, never propagated.
    async fn persist(&self, entry: &SecurityLogEntry) {
        if let Err(e) = self.append_line(entry).await {
            warn!("Security log write failed: {}", e);
            self.sink.report(
                "Security log write failed",
                json!({ "error": e.to_string(), "category": entry.category.as_str() }),
            );
        }

        if entry.severity == Severity::Critical {
            if let Ok(detail) = serde_json::to_value(entry) {
                self.sink.report("Critical security event", detail);
            }
        }
    }

    async fn append_line(&self, entry: &SecurityLogEntry) -> Result<()> {
        let day = entry
            .timestamp
            .map(|ts| ts.date_naive())
            .unwrap_or_else(|| Utc::now().date_naive());
        let path = self.log_file_path(entry.category, day);

        // One full line per write; never read-modify-append
        let line = format!("{}\n", serde_json::to_string(entry)?);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(line.as_bytes()).await?;

        Ok(())
    }

    /// Path of the day file for a category
    pub(super) fn log_file_path(&self, category: LogCategory, day: NaiveDate) -> PathBuf {
        self.log_dir
            .join(category.as_str())
            .join(format!("{}-{}.log", category.as_str(), day.format("%Y-%m-%d")))
    }

    /// Record suspicious activity for an origin and detect bursts
    ///
    /// Returns the critical burst entry once the count inside the
    /// sliding window reaches the threshold. The burst entry is written
    /// by the caller and is not fed back into the detector.
    async fn track_suspicious(
        &self,
        origin: &str,
        activity_type: String,
    ) -> Option<SecurityLogEntry> {
        let mut suspicious = self.suspicious.write().await;
        let records = suspicious.entry(origin.to_string()).or_default();

        let now = Instant::now();
        records.retain(|record| now - record.at < self.suspicious_window);
        records.push(ActivityRecord {
            at: now,
            activity_type,
        });

        if records.len() < self.suspicious_threshold {
            return None;
        }

        let activities: Vec<&str> = records
            .iter()
            .map(|record| record.activity_type.as_str())
            .collect();

        Some(SecurityLogEntry {
            category: LogCategory::Suspicious,
            severity: Severity::Critical,
            message: "Excessive suspicious activity detected".to_string(),
            details: json!({
                "origin": origin,
                "activity_count": activities.len(),
                "activities": activities,
            }),
            subject_id: None,
            origin: Some(origin.to_string()),
            timestamp: None,
        })
    }
}

fn stamped(mut entry: SecurityLogEntry) -> SecurityLogEntry {
    entry.timestamp = Some(Utc::now());
    entry
}

/// Merge extra detail fields over a base object
fn merge_details(
    mut base: serde_json::Value,
    extra: Option<serde_json::Value>,
) -> serde_json::Value {
    if let (Some(base_map), Some(serde_json::Value::Object(extra_map))) =
        (base.as_object_mut(), extra)
    {
        for (key, value) in extra_map {
            base_map.insert(key, value);
        }
    }
    base
}
