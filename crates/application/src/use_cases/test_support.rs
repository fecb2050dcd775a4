//! Minimal port implementations for use case tests.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};
use keyprobe_domain::{
    Assertion, AssertionResult, CaptureError, CaptureRule, CaptureSummary, RenderedRequest,
    ResponseSpec, RunEnvironment, TestCase, TestCaseOutcome, TestResults,
};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, FieldCapturer, ResponseEvaluator, ResponseSource, ResultReporter};

/// Evaluates status assertions only; anything else fails.
pub struct StatusEvaluator;

impl ResponseEvaluator for StatusEvaluator {
    fn evaluate(&self, case_name: &str, assertions: &[Assertion], response: &ResponseSpec) -> TestResults {
        let results = assertions
            .iter()
            .map(|assertion| {
                let result = match assertion {
                    Assertion::StatusCode { expected } if expected.matches(response.status) => {
                        AssertionResult::pass(assertion.clone())
                    }
                    _ => AssertionResult::fail(assertion.clone(), "unmet"),
                };
                result.in_case(case_name)
            })
            .collect();
        TestResults::new(case_name, results, 0)
    }
}

/// Captures `$.<field>` rules from the top level of the body.
pub struct TopLevelCapturer;

impl FieldCapturer for TopLevelCapturer {
    fn capture(
        &self,
        rules: &[CaptureRule],
        response: &ResponseSpec,
        env: &mut RunEnvironment,
    ) -> Result<CaptureSummary, CaptureError> {
        let body = response
            .body_json()
            .map_err(|e| CaptureError::InvalidBody(e.to_string()))?;
        let mut summary = CaptureSummary::default();
        for rule in rules {
            let field = rule.source.trim_start_matches("$.");
            match body.get(field).filter(|v| !v.is_null()) {
                Some(value) => {
                    env.set(rule.target.clone(), rule.encoding.encode(value))?;
                    summary.written.push(rule.target.clone());
                }
                None => {
                    env.set_placeholder(rule.target.clone())?;
                    summary.missing.push(rule.target.clone());
                }
            }
        }
        Ok(summary)
    }
}

/// Records reporter calls as strings.
#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl ResultReporter for RecordingReporter {
    fn assertion(&mut self, result: &AssertionResult) {
        let verdict = if result.passed { "pass" } else { "fail" };
        self.events.push(format!("assertion: {} ({verdict})", result.label));
    }

    fn capture_failed(&mut self, case_name: &str, _error: &CaptureError) {
        self.events.push(format!("capture failed: {case_name}"));
    }

    fn case_finished(&mut self, outcome: &TestCaseOutcome) {
        self.events.push(format!("finished: {}", outcome.case_name()));
    }
}

/// Hands out queued responses and records the requests it saw.
#[derive(Default)]
pub struct QueuedResponses {
    pub queue: VecDeque<ApplicationResult<ResponseSpec>>,
    pub seen: Vec<Option<RenderedRequest>>,
}

impl QueuedResponses {
    pub fn new(responses: impl IntoIterator<Item = ApplicationResult<ResponseSpec>>) -> Self {
        Self {
            queue: responses.into_iter().collect(),
            seen: Vec::new(),
        }
    }
}

impl ResponseSource for QueuedResponses {
    fn response_for(
        &mut self,
        case: &TestCase,
        request: Option<&RenderedRequest>,
    ) -> ApplicationResult<ResponseSpec> {
        self.seen.push(request.cloned());
        self.queue
            .pop_front()
            .unwrap_or_else(|| Err(ApplicationError::MissingResponse(case.name.clone())))
    }
}

/// A clock stuck at 2024-01-01T00:00:00Z.
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }
}
