//! Notification sink seam.
//!
//! Views receive a `&dyn NotificationSink` instead of reaching for a shared
//! global, so tests can hand them a recorder.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Anything that can surface a transient message to the user.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sink that keeps every message it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    received: Mutex<Vec<(String, Severity)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<(String, Severity)> {
        self.received.lock().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.received.lock().last().cloned()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, severity: Severity) {
        self.received.lock().push((message.to_string(), severity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink() {
        let sink = RecordingSink::new();
        assert!(sink.last().is_none());

        sink.notify("saved", Severity::Success);
        sink.notify("failed", Severity::Error);

        assert_eq!(sink.received().len(), 2);
        assert_eq!(sink.last(), Some(("failed".to_string(), Severity::Error)));
    }

    #[test]
    fn test_severity_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), r#""warning""#);
        assert_eq!(Severity::Success.as_str(), "success");
    }
}
