//! Reporting sink for load-time problems.
//!
//! The core never prints; it hands every parse failure and fatal condition
//! to a [`Diagnostics`] implementation. The CLI renders the collected
//! entries, tests assert on them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A tolerated problem, e.g. one malformed record.
    Error,
    /// An unrecoverable condition, e.g. an aborted load.
    Critical,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

pub trait Diagnostics {
    /// A tolerated load failure (malformed record, parse exception).
    fn load_error(&mut self, message: &str);

    /// A tolerated load failure attributed to a specific record.
    fn record_error(&mut self, message: &str, record: &str) {
        self.load_error(&format!("{} [record: {}]", message, record));
    }

    /// An unrecoverable condition for the current operation.
    fn fatal(&mut self, message: &str);
}

/// Collecting implementation used by the CLI and by tests.
#[derive(Debug, Default)]
pub struct DiagnosticsLog {
    pub entries: Vec<Diagnostic>,
}

impl DiagnosticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fatal(&self) -> bool {
        self.entries
            .iter()
            .any(|d| d.severity == Severity::Critical)
    }
}

impl Diagnostics for DiagnosticsLog {
    fn load_error(&mut self, message: &str) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message: message.to_string(),
        });
    }

    fn fatal(&mut self, message: &str) {
        self.entries.push(Diagnostic {
            severity: Severity::Critical,
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_includes_identity() {
        let mut log = DiagnosticsLog::new();
        log.record_error("Failed to read a record.", "501");
        assert_eq!(log.entries.len(), 1);
        assert!(log.entries[0].message.contains("501"));
        assert_eq!(log.entries[0].severity, Severity::Error);
    }

    #[test]
    fn test_has_fatal() {
        let mut log = DiagnosticsLog::new();
        log.load_error("minor");
        assert!(!log.has_fatal());
        log.fatal("major");
        assert!(log.has_fatal());
    }
}
