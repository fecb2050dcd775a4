//! Result reporting port

use keyprobe_domain::{AssertionResult, CaptureError, TestCaseOutcome};

/// Receives results as they are produced.
///
/// Aggregation and formatting belong to the implementation.
pub trait ResultReporter {
    /// Called once per evaluated assertion.
    fn assertion(&mut self, result: &AssertionResult);

    /// Called when a capture step wrote nothing.
    fn capture_failed(&mut self, case_name: &str, error: &CaptureError);

    /// Called after a test case finished both steps.
    fn case_finished(&mut self, _outcome: &TestCaseOutcome) {}
}
