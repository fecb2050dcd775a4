//! Run sequence use case.
//!
//! Runs the cases of a plan in order against one run environment, so each
//! case sees what every earlier case captured and nothing later.

use keyprobe_domain::{RunEnvironment, RunReport, SkippedCase, TestPlan};
use tracing::{info, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, FieldCapturer, ResponseEvaluator, ResponseSource, ResultReporter};

use super::run_test_case::RunTestCase;

const STOPPED_REASON: &str = "run stopped after a failed case";

/// Use case for running an ordered test plan.
pub struct RunSequence<E: ResponseEvaluator, C: FieldCapturer, K: Clock> {
    case_runner: RunTestCase<E, C>,
    clock: K,
}

impl<E: ResponseEvaluator, C: FieldCapturer, K: Clock> RunSequence<E, C, K> {
    /// Creates a new `RunSequence` use case.
    #[must_use]
    pub const fn new(case_runner: RunTestCase<E, C>, clock: K) -> Self {
        Self { case_runner, clock }
    }

    /// Runs every case of `plan` in order.
    ///
    /// Each case's request is rendered from `env` as it stands when the case
    /// starts. With `stop_on_failure`, the cases after the first failed one
    /// are listed as skipped; otherwise every case runs.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidTestCase`] before anything runs if
    /// a case definition is invalid. Per-case failures are in the report.
    pub fn execute(
        &self,
        plan: &TestPlan,
        source: &mut dyn ResponseSource,
        env: &mut RunEnvironment,
        reporter: &mut dyn ResultReporter,
    ) -> ApplicationResult<RunReport> {
        for case in &plan.cases {
            case.validate()
                .map_err(|error| ApplicationError::InvalidTestCase {
                    case: case.name.clone(),
                    source: error,
                })?;
        }

        let mut report = RunReport::new(env.run_id, self.clock.now());
        let mut halted = false;

        for case in &plan.cases {
            if halted {
                report.skipped.push(SkippedCase {
                    name: case.name.clone(),
                    reason: STOPPED_REASON.to_string(),
                });
                continue;
            }

            let request = case.request.as_ref().map(|template| template.render(env));
            if let Some(rendered) = &request
                && !rendered.is_complete()
            {
                warn!(
                    case = %case.name,
                    unresolved = ?rendered.unresolved,
                    "request references values no earlier case provided"
                );
            }

            match source.response_for(case, request.as_ref()) {
                Ok(response) => {
                    let outcome = self.case_runner.execute(case, &response, env, reporter);
                    halted = plan.policy.stop_on_failure && !outcome.passed();
                    report.outcomes.push(outcome);
                }
                Err(error) => {
                    warn!(case = %case.name, %error, "no response, case not run");
                    report.skipped.push(SkippedCase {
                        name: case.name.clone(),
                        reason: error.to_string(),
                    });
                    halted = plan.policy.stop_on_failure;
                }
            }
        }

        info!(
            run_id = %report.run_id,
            passed = report.all_passed(),
            summary = %report.summary_line(),
            "run finished"
        );
        Ok(report)
    }
}
