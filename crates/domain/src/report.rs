//! Outcomes of test cases and whole runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::CaptureSummary;
use crate::testing::{AssertionResult, TestResults};

/// What the capture step of a test case did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureStatus {
    /// The case declares no capture rules.
    NotRequested,
    /// The body parsed and every rule wrote its key.
    Captured(CaptureSummary),
    /// Nothing was written.
    Failed {
        /// Why the step failed.
        error: String,
    },
}

impl CaptureStatus {
    /// Returns true unless the step failed.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseOutcome {
    /// Identifier of the case definition.
    pub case_id: Uuid,
    /// Assertion results.
    pub results: TestResults,
    /// Capture step result.
    pub capture: CaptureStatus,
}

impl TestCaseOutcome {
    /// Name of the case.
    #[must_use]
    pub fn case_name(&self) -> &str {
        &self.results.case_name
    }

    /// A case passes when every assertion passed and capture did not fail.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.results.all_passed() && self.capture.succeeded()
    }

    /// Report lines for this case, one per assertion plus a capture failure line.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .results
            .results
            .iter()
            .map(AssertionResult::report_line)
            .collect();
        if let CaptureStatus::Failed { error } = &self.capture {
            lines.push(format!("[FAIL] {} - capture: {error}", self.case_name()));
        }
        lines
    }
}

/// A case that did not run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCase {
    /// Case name.
    pub name: String,
    /// Why it did not run.
    pub reason: String,
}

/// Outcome of an ordered run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Run identifier, shared with the run environment.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Outcomes in execution order.
    pub outcomes: Vec<TestCaseOutcome>,
    /// Cases that did not run, in plan order.
    #[serde(default)]
    pub skipped: Vec<SkippedCase>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new(run_id: Uuid, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id,
            started_at,
            outcomes: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of assertions evaluated across the run.
    #[must_use]
    pub fn total_assertions(&self) -> usize {
        self.outcomes.iter().map(|o| o.results.total).sum()
    }

    /// Number of failed assertions across the run.
    #[must_use]
    pub fn failed_assertions(&self) -> usize {
        self.outcomes.iter().map(|o| o.results.failed).sum()
    }

    /// Number of cases that failed.
    #[must_use]
    pub fn failed_cases(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed()).count()
    }

    /// True when every case ran and passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.skipped.is_empty() && self.failed_cases() == 0
    }

    /// e.g. `3 cases, 1 failed, 0 skipped; 5 assertions, 1 failed`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} cases, {} failed, {} skipped; {} assertions, {} failed",
            self.outcomes.len(),
            self.failed_cases(),
            self.skipped.len(),
            self.total_assertions(),
            self.failed_assertions()
        )
    }

    /// Every report line of the run, in order, followed by the summary.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .outcomes
            .iter()
            .flat_map(TestCaseOutcome::report_lines)
            .collect();
        lines.extend(
            self.skipped
                .iter()
                .map(|s| format!("[SKIP] {}: {}", s.name, s.reason)),
        );
        lines.push(self.summary_line());
        lines.join("\n")
    }
}
