//! Critical-event sink
//!
//! Seam for the host application's general error reporting channel.
//! Critical audit entries, repeated login failures, and unrecoverable
//! log write errors are forwarded here.

use std::sync::Arc;
use tracing::error;

/// General-purpose error reporting channel
pub trait CriticalSink: Send + Sync {
    /// Report a critical event with a short context label and a
    /// structured detail payload
    fn report(&self, context: &str, detail: serde_json::Value);
}

/// Default sink that routes reports to the `tracing` error stream
#[derive(Debug, Default)]
pub struct TracingSink;

impl CriticalSink for TracingSink {
    fn report(&self, context: &str, detail: serde_json::Value) {
        error!(context, %detail, "critical security event");
    }
}

/// Convenience constructor for the default sink
pub fn tracing_sink() -> Arc<dyn CriticalSink> {
    Arc::new(TracingSink)
}

/// Test support: a sink that records every report for assertions
#[cfg(test)]
pub(crate) mod testing {
    use super::CriticalSink;
    use parking_lot::Mutex;

    pub struct RecordingSink {
        pub reports: Mutex<Vec<(String, serde_json::Value)>>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self {
                reports: Mutex::new(Vec::new()),
            }
        }

        pub fn contexts(&self) -> Vec<String> {
            self.reports.lock().iter().map(|(c, _)| c.clone()).collect()
        }
    }

    impl CriticalSink for RecordingSink {
        fn report(&self, context: &str, detail: serde_json::Value) {
            self.reports.lock().push((context.to_string(), detail));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn test_tracing_sink_does_not_panic() {
        let sink = tracing_sink();
        sink.report("test", serde_json::json!({"key": "value"}));
    }

    #[test]
    fn test_recording_sink_captures_reports() {
        let sink = RecordingSink::new();
        sink.report("ctx", serde_json::json!({"n": 1}));

        let reports = sink.reports.lock();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "ctx");
    }
}
