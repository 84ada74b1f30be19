//! Bounded tolerance for malformed records.
//!
//! Each load gets a fresh budget. Every reported failure decrements it and
//! is logged; once the counter drops below [`ABORT_FLOOR`] the load must be
//! abandoned. With a starting budget of 3 that happens exactly on the 14th
//! report.

use crate::diagnostics::Diagnostics;

const INITIAL_BUDGET: i32 = 3;
const ABORT_FLOOR: i32 = -10;

#[derive(Debug)]
pub struct ErrorBudget {
    remaining: i32,
}

impl Default for ErrorBudget {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorBudget {
    pub fn new() -> Self {
        Self {
            remaining: INITIAL_BUDGET,
        }
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Report a failure. Returns `true` while loading may continue and the
    /// offending record should simply be skipped, `false` once the load has
    /// to stop.
    pub fn report<D: Diagnostics>(&mut self, diags: &mut D, message: &str) -> bool {
        diags.load_error(message);
        self.note_failure(diags)
    }

    /// Report a failure attributed to a specific record identity.
    pub fn report_record<D: Diagnostics>(&mut self, diags: &mut D, record: &str) -> bool {
        diags.record_error("Failed to read a record.", record);
        self.note_failure(diags)
    }

    fn note_failure<D: Diagnostics>(&mut self, diags: &mut D) -> bool {
        self.remaining -= 1;

        if self.remaining < ABORT_FLOOR {
            diags.fatal("Too many records failed to parse, the load will stop.");
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsLog;

    #[test]
    fn test_first_reports_are_tolerated() {
        let mut budget = ErrorBudget::new();
        let mut log = DiagnosticsLog::new();

        for _ in 0..13 {
            assert!(budget.report(&mut log, "bad record"));
        }
        assert_eq!(budget.remaining(), -10);
        assert!(!log.has_fatal());
    }

    #[test]
    fn test_fourteenth_report_stops_the_load() {
        let mut budget = ErrorBudget::new();
        let mut log = DiagnosticsLog::new();

        for call in 1..=14 {
            let keep_going = budget.report(&mut log, "bad record");
            if call < 14 {
                assert!(keep_going, "call {} should continue", call);
            } else {
                assert!(!keep_going, "call 14 must stop");
            }
        }
        assert_eq!(budget.remaining(), -11);
        assert!(log.has_fatal());
    }

    #[test]
    fn test_budget_never_increases() {
        let mut budget = ErrorBudget::new();
        let mut log = DiagnosticsLog::new();

        let mut previous = budget.remaining();
        for _ in 0..5 {
            budget.report_record(&mut log, "1101");
            assert!(budget.remaining() < previous);
            previous = budget.remaining();
        }
    }

    #[test]
    fn test_every_report_is_logged() {
        let mut budget = ErrorBudget::new();
        let mut log = DiagnosticsLog::new();

        budget.report(&mut log, "duplicate key");
        budget.report_record(&mut log, "4001");
        assert_eq!(log.entries.len(), 2);
        assert!(log.entries[1].message.contains("4001"));
    }
}
