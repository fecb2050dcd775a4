//! Reporter that forwards results to `tracing`.

use keyprobe_application::ports::ResultReporter;
use keyprobe_domain::{AssertionResult, CaptureError, TestCaseOutcome};
use tracing::{error, info};

/// Emits one event per result under the `keyprobe::report` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    /// Creates a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ResultReporter for TracingReporter {
    fn assertion(&mut self, result: &AssertionResult) {
        if result.passed {
            info!(target: "keyprobe::report", label = %result.label, "PASS");
        } else {
            error!(
                target: "keyprobe::report",
                label = %result.label,
                actual = result.actual.as_deref().unwrap_or_default(),
                error = result.error.as_deref().unwrap_or_default(),
                "FAIL"
            );
        }
    }

    fn capture_failed(&mut self, case_name: &str, error: &CaptureError) {
        error!(target: "keyprobe::report", case = case_name, %error, "capture FAIL");
    }

    fn case_finished(&mut self, outcome: &TestCaseOutcome) {
        info!(
            target: "keyprobe::report",
            case = outcome.case_name(),
            passed = outcome.passed(),
            duration_ms = outcome.results.duration_ms,
            "case done"
        );
    }
}
