//! Run test case use case.
//!
//! The single entry point of a test case: assertions first, then capture
//! into the run environment, whatever the assertions said.

use keyprobe_domain::{CaptureStatus, ResponseSpec, RunEnvironment, TestCase, TestCaseOutcome};
use tracing::{debug, info, warn};

use crate::ports::{FieldCapturer, ResponseEvaluator, ResultReporter};

/// Use case for evaluating one test case against its response.
pub struct RunTestCase<E: ResponseEvaluator, C: FieldCapturer> {
    evaluator: E,
    capturer: C,
}

impl<E: ResponseEvaluator, C: FieldCapturer> RunTestCase<E, C> {
    /// Creates a new `RunTestCase` use case.
    #[must_use]
    pub const fn new(evaluator: E, capturer: C) -> Self {
        Self {
            evaluator,
            capturer,
        }
    }

    /// Evaluates `case` against `response` and updates `env`.
    ///
    /// Every assertion result is handed to `reporter` before capture starts.
    /// Capture runs even when assertions failed. A capture failure leaves
    /// `env` untouched and is reported, never returned as an error.
    pub fn execute(
        &self,
        case: &TestCase,
        response: &ResponseSpec,
        env: &mut RunEnvironment,
        reporter: &mut dyn ResultReporter,
    ) -> TestCaseOutcome {
        let results = self
            .evaluator
            .evaluate(&case.name, &case.assertions, response);

        for result in &results.results {
            if !result.passed {
                debug!(
                    case = %case.name,
                    label = %result.label,
                    error = result.error.as_deref().unwrap_or_default(),
                    "assertion failed"
                );
            }
            reporter.assertion(result);
        }

        let capture = if case.captures.is_empty() {
            CaptureStatus::NotRequested
        } else {
            match self.capturer.capture(&case.captures, response, env) {
                Ok(summary) => {
                    debug!(case = %case.name, written = ?summary.written, "captured fields");
                    if !summary.is_complete() {
                        warn!(
                            case = %case.name,
                            missing = ?summary.missing,
                            "fields absent from body, stored placeholder"
                        );
                    }
                    CaptureStatus::Captured(summary)
                }
                Err(error) => {
                    debug!(case = %case.name, %error, "capture failed, environment unchanged");
                    reporter.capture_failed(&case.name, &error);
                    CaptureStatus::Failed {
                        error: error.to_string(),
                    }
                }
            }
        };

        let outcome = TestCaseOutcome {
            case_id: case.id,
            results,
            capture,
        };

        info!(
            case = %case.name,
            status = response.status,
            passed = outcome.passed(),
            assertions = outcome.results.total,
            failed = outcome.results.failed,
            "test case finished"
        );
        reporter.case_finished(&outcome);
        outcome
    }
}
