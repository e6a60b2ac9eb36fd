//! Log search, metrics aggregation, and retention cleanup

use super::types::{
    LogCategory, LogFilters, OriginCount, SecurityLogEntry, SecurityMetrics,
};
use super::SecurityAuditLog;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

impl SecurityAuditLog {
    /// Read every entry of a category within a date range
    ///
    /// Walks the day files overlapping the range; corrupt lines and
    /// missing files are skipped, not fatal.
    pub async fn search_logs(
        &self,
        category: LogCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        filters: Option<&LogFilters>,
    ) -> Vec<SecurityLogEntry> {
        let mut results = Vec::new();
        if end < start {
            return results;
        }

        let mut day = start.date_naive();
        let last = end.date_naive();

        while day <= last {
            let path = self.log_file_path(category, day);
            if let Ok(content) = tokio::fs::read_to_string(&path).await {
                for line in content.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let Ok(entry) = serde_json::from_str::<SecurityLogEntry>(line) else {
                        debug!("Skipping corrupt log line in {}", path.display());
                        continue;
                    };
                    let Some(timestamp) = entry.timestamp else {
                        continue;
                    };
                    if timestamp < start || timestamp > end {
                        continue;
                    }
                    if let Some(filters) = filters {
                        if !filters.matches(&entry) {
                            continue;
                        }
                    }
                    results.push(entry);
                }
            }

            let Some(next) = day.succ_opt() else { break };
            day = next;
        }

        results
    }

    /// Aggregate security metrics over a date range
    ///
    /// Derived entirely from `search_logs`; no separate storage.
    pub async fn get_security_metrics(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SecurityMetrics {
        let auth_logs = self.search_logs(LogCategory::Auth, start, end, None).await;
        let access_logs = self
            .search_logs(LogCategory::Access, start, end, None)
            .await;
        let suspicious_logs = self
            .search_logs(LogCategory::Suspicious, start, end, None)
            .await;

        let failed_logins = auth_logs
            .iter()
            .filter(|entry| {
                entry.details.get("action").and_then(|v| v.as_str()) == Some("login")
                    && entry.details.get("success").and_then(|v| v.as_bool()) == Some(false)
            })
            .count();

        let access_denials = access_logs
            .iter()
            .filter(|entry| {
                entry.details.get("success").and_then(|v| v.as_bool()) == Some(false)
            })
            .count();

        SecurityMetrics {
            total_auth_attempts: auth_logs.len(),
            failed_logins,
            access_denials,
            suspicious_activities: suspicious_logs.len(),
            top_suspicious_origins: top_origins(&suspicious_logs),
            severity_breakdown: severity_breakdown(
                auth_logs
                    .iter()
                    .chain(access_logs.iter())
                    .chain(suspicious_logs.iter()),
            ),
        }
    }

    /// Delete log files older than the retention window
    ///
    /// Age is judged by file modification time. Intended to run on idle
    /// or teardown.
    pub async fn cleanup_old_logs(&self, days_to_keep: u32) {
        let max_age = Duration::from_secs(u64::from(days_to_keep) * 24 * 60 * 60);

        for category in LogCategory::ALL {
            let dir = self.log_dir.join(category.as_str());
            let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
                continue;
            };

            while let Ok(Some(entry)) = entries.next_entry().await {
                let Ok(metadata) = entry.metadata().await else {
                    continue;
                };
                let Ok(modified) = metadata.modified() else {
                    continue;
                };
                let expired = modified
                    .elapsed()
                    .map(|elapsed| elapsed > max_age)
                    .unwrap_or(false);

                if expired {
                    if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                        warn!(
                            "Failed to remove expired log file {}: {}",
                            entry.path().display(),
                            e
                        );
                    }
                }
            }
        }
    }
}

fn top_origins(entries: &[SecurityLogEntry]) -> Vec<OriginCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if let Some(origin) = entry.origin.as_deref() {
            *counts.entry(origin).or_default() += 1;
        }
    }

    let mut top: Vec<OriginCount> = counts
        .into_iter()
        .map(|(origin, count)| OriginCount {
            origin: origin.to_string(),
            count,
        })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count));
    top.truncate(10);
    top
}

fn severity_breakdown<'a>(
    entries: impl Iterator<Item = &'a SecurityLogEntry>,
) -> HashMap<String, usize> {
    let mut breakdown: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        *breakdown
            .entry(entry.severity.as_str().to_string())
            .or_default() += 1;
    }
    breakdown
}
