//! Response evaluation port

use keyprobe_domain::{Assertion, ResponseSpec, TestResults};

/// Evaluates assertions against a completed response.
///
/// Implementations never fail: an unmet or unevaluable condition is a failed
/// result, and there is exactly one result per assertion.
pub trait ResponseEvaluator {
    /// Runs `assertions` in order. Result labels are prefixed with `case_name`.
    fn evaluate(
        &self,
        case_name: &str,
        assertions: &[Assertion],
        response: &ResponseSpec,
    ) -> TestResults;
}
