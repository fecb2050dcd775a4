//! In-memory reporter.

use keyprobe_application::ports::ResultReporter;
use keyprobe_domain::{AssertionResult, CaptureError};

/// Keeps every reported result, in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    assertions: Vec<AssertionResult>,
    capture_failures: Vec<(String, String)>,
}

impl CollectingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assertion results received so far.
    #[must_use]
    pub fn assertions(&self) -> &[AssertionResult] {
        &self.assertions
    }

    /// `(case name, error message)` for each failed capture step.
    #[must_use]
    pub fn capture_failures(&self) -> &[(String, String)] {
        &self.capture_failures
    }

    /// Labels of the failed assertions.
    #[must_use]
    pub fn failed_labels(&self) -> Vec<&str> {
        self.assertions
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.label.as_str())
            .collect()
    }

    /// One `[PASS]`/`[FAIL]` line per result, capture failures last.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.assertions
            .iter()
            .map(AssertionResult::report_line)
            .chain(
                self.capture_failures
                    .iter()
                    .map(|(case, error)| format!("[FAIL] {case} - capture: {error}")),
            )
            .collect()
    }
}

impl ResultReporter for CollectingReporter {
    fn assertion(&mut self, result: &AssertionResult) {
        self.assertions.push(result.clone());
    }

    fn capture_failed(&mut self, case_name: &str, error: &CaptureError) {
        self.capture_failures
            .push((case_name.to_string(), error.to_string()));
    }
}
