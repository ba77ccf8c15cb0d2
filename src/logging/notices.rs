// User-visible notices
//
// Notices are the messages a user is meant to read (missing palette, broken
// sidecar, failed write), as opposed to diagnostic tracing output. Every
// notice is also mirrored into tracing so file logs keep a record.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Maximum number of notices kept in memory
const MAX_NOTICES: usize = 200;

/// Tracing target of mirrored notices. The console layer skips it since
/// `ConsoleNotifier` already printed the notice.
pub const NOTICE_TARGET: &str = "wallust_themes::notice";

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Get the display string for this severity
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub message: String,
}

/// Sink for user-visible messages
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);

    fn info(&self, message: &str) {
        self.notify(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.notify(Severity::Warning, message);
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message);
    }
}

/// In-memory notice history with bounded size (ring buffer)
#[derive(Clone, Default)]
pub struct NoticeBuffer {
    entries: Arc<Mutex<VecDeque<Notice>>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notice, evicting the oldest when full
    pub fn add(&self, notice: Notice) {
        let mut entries = self.lock();
        if entries.len() >= MAX_NOTICES {
            entries.pop_front();
        }
        entries.push_back(notice);
    }

    /// All notices, most recent last
    pub fn get_all(&self) -> Vec<Notice> {
        self.lock().iter().cloned().collect()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|n| n.severity == severity).count()
    }

    // A panic while holding the lock cannot leave a VecDeque half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Notice>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NoticeBuffer {
    fn notify(&self, severity: Severity, message: &str) {
        self.add(Notice {
            timestamp: Utc::now(),
            severity,
            message: message.to_string(),
        });
    }
}

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Prints notices to stderr and records them in a history buffer
#[derive(Clone)]
pub struct ConsoleNotifier {
    history: NoticeBuffer,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            history: NoticeBuffer::new(),
        }
    }

    pub fn history(&self) -> &NoticeBuffer {
        &self.history
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        use colors::*;

        let color = match severity {
            Severity::Info => CYAN,
            Severity::Warning => YELLOW,
            Severity::Error => RED,
        };
        eprintln!("{BOLD}{color}{}{RESET}: {message}", severity.as_str());

        match severity {
            Severity::Info => tracing::info!(target: NOTICE_TARGET, "{message}"),
            Severity::Warning => tracing::warn!(target: NOTICE_TARGET, "{message}"),
            Severity::Error => tracing::error!(target: NOTICE_TARGET, "{message}"),
        }

        self.history.notify(severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_records_in_order_and_counts() {
        let buffer = NoticeBuffer::new();
        buffer.warn("first");
        buffer.error("second");
        buffer.error("third");

        let all = buffer.get_all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].message, "first");
        assert_eq!(all[2].severity, Severity::Error);
        assert_eq!(buffer.count(Severity::Error), 2);
        assert_eq!(buffer.count(Severity::Info), 0);
    }

    #[test]
    fn buffer_evicts_oldest_when_full() {
        let buffer = NoticeBuffer::new();
        for i in 0..MAX_NOTICES + 5 {
            buffer.info(&format!("notice {i}"));
        }

        let all = buffer.get_all();
        assert_eq!(all.len(), MAX_NOTICES);
        assert_eq!(all[0].message, "notice 5");
    }

    #[test]
    fn clones_share_history() {
        let buffer = NoticeBuffer::new();
        let clone = buffer.clone();
        clone.warn("shared");
        assert_eq!(buffer.count(Severity::Warning), 1);
        assert_eq!(clone.get_all()[0].message, "shared");
    }

    #[test]
    fn console_notifier_keeps_history() {
        let console = ConsoleNotifier::new();
        console.error("boom");
        assert_eq!(console.history().count(Severity::Error), 1);
    }
}
