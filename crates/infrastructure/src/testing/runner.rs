//! Test runner implementation.
//!
//! Executes assertions against HTTP responses and produces test results.

use std::time::Instant;

use keyprobe_application::ports::ResponseEvaluator;
use keyprobe_domain::{
    Assertion, AssertionResult, ComparisonOperator, JsonPath, ResponseSpec, StatusExpectation,
    TestResults,
};
use regex::Regex;
use serde_json::Value;

const PREVIEW_CHARS: usize = 100;

/// Test runner that executes assertions against responses.
///
/// Every assertion is evaluated, in order, whatever the previous ones
/// returned.
#[derive(Debug, Default, Clone, Copy)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Run a single assertion against a response.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn run_assertion(&self, assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match assertion {
            Assertion::StatusCode { expected } => Self::check_status_code(assertion, response, expected),
            Assertion::HeaderExists { name, value } => {
                Self::check_header_exists(assertion, response, name, value.as_deref())
            }
            Assertion::HeaderMatches { name, pattern } => {
                Self::check_header_matches(assertion, response, name, pattern)
            }
            Assertion::ContentType { expected } => {
                Self::check_content_type(assertion, response, expected)
            }
            Assertion::BodyContains { text, ignore_case } => {
                Self::check_body_contains(assertion, response, text, *ignore_case)
            }
            Assertion::IsJson => Self::check_is_json(assertion, response),
            Assertion::JsonPath { path, expected } => {
                Self::check_json_path(assertion, response, path, expected.as_ref())
            }
            Assertion::JsonPathMatches {
                path,
                operator,
                value,
            } => Self::check_json_path_matches(assertion, response, path, *operator, value),
        }
    }

    fn check_status_code(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &StatusExpectation,
    ) -> AssertionResult {
        let actual = response.status;
        if expected.matches(actual) {
            AssertionResult::pass_with_value(assertion.clone(), actual.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                actual.to_string(),
                format!(
                    "Expected status {}, got {}",
                    expected.description(),
                    response.status_code()
                ),
            )
        }
    }

    fn check_header_exists(
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        expected_value: Option<&str>,
    ) -> AssertionResult {
        match (response.get_header(name), expected_value) {
            (Some(actual), Some(expected)) if actual != expected => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Header '{name}' value mismatch: expected '{expected}', got '{actual}'"),
            ),
            (Some(actual), _) => AssertionResult::pass_with_value(assertion.clone(), actual.clone()),
            (None, _) => AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found")),
        }
    }

    fn check_header_matches(
        assertion: &Assertion,
        response: &ResponseSpec,
        name: &str,
        pattern: &str,
    ) -> AssertionResult {
        let Some(actual) = response.get_header(name) else {
            return AssertionResult::fail(assertion.clone(), format!("Header '{name}' not found"));
        };
        match Regex::new(pattern) {
            Ok(regex) if regex.is_match(actual) => {
                AssertionResult::pass_with_value(assertion.clone(), actual.clone())
            }
            Ok(_) => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Header '{name}' value '{actual}' does not match pattern '{pattern}'"),
            ),
            Err(e) => AssertionResult::fail(
                assertion.clone(),
                format!("Invalid regex pattern '{pattern}': {e}"),
            ),
        }
    }

    fn check_content_type(
        assertion: &Assertion,
        response: &ResponseSpec,
        expected: &str,
    ) -> AssertionResult {
        match response.content_type() {
            Some(actual) if actual.contains(expected) => {
                AssertionResult::pass_with_value(assertion.clone(), actual.clone())
            }
            Some(actual) => AssertionResult::fail_with_value(
                assertion.clone(),
                actual.clone(),
                format!("Content-Type '{actual}' does not contain '{expected}'"),
            ),
            None => AssertionResult::fail(assertion.clone(), "No Content-Type header present"),
        }
    }

    fn check_body_contains(
        assertion: &Assertion,
        response: &ResponseSpec,
        text: &str,
        ignore_case: bool,
    ) -> AssertionResult {
        let body = &response.body;
        let contains = if ignore_case {
            body.to_lowercase().contains(&text.to_lowercase())
        } else {
            body.contains(text)
        };

        if contains {
            AssertionResult::pass(assertion.clone())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                response.body_preview(PREVIEW_CHARS),
                format!("Body does not contain '{text}'"),
            )
        }
    }

    fn check_is_json(assertion: &Assertion, response: &ResponseSpec) -> AssertionResult {
        match response.body_json() {
            Ok(_) => AssertionResult::pass(assertion.clone()),
            Err(e) => AssertionResult::fail(assertion.clone(), format!("Body is not valid JSON: {e}")),
        }
    }

    fn check_json_path(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        expected: Option<&Value>,
    ) -> AssertionResult {
        let value = match Self::query(response, path) {
            Ok(value) => value,
            Err(error) => return AssertionResult::fail(assertion.clone(), error),
        };

        match expected {
            Some(expected_value) if &value != expected_value => AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!("JSON path '{path}' value mismatch: expected {expected_value}, got {value}"),
            ),
            _ => AssertionResult::pass_with_value(assertion.clone(), value.to_string()),
        }
    }

    fn check_json_path_matches(
        assertion: &Assertion,
        response: &ResponseSpec,
        path: &str,
        operator: ComparisonOperator,
        expected: &Value,
    ) -> AssertionResult {
        let value = match Self::query(response, path) {
            Ok(value) => value,
            Err(error) => return AssertionResult::fail(assertion.clone(), error),
        };

        if compare_json_values(&value, operator, expected) {
            AssertionResult::pass_with_value(assertion.clone(), value.to_string())
        } else {
            AssertionResult::fail_with_value(
                assertion.clone(),
                value.to_string(),
                format!(
                    "JSON path '{path}' comparison failed: {value} {} {expected}",
                    operator.symbol()
                ),
            )
        }
    }

    /// Parse the body and look `path` up, turning every miss into a message.
    fn query(response: &ResponseSpec, path: &str) -> Result<Value, String> {
        let json = response
            .body_json()
            .map_err(|e| format!("Failed to parse body as JSON: {e}"))?;
        let path = JsonPath::parse(path).map_err(|e| e.to_string())?;
        path.query(&json)
            .cloned()
            .ok_or_else(|| format!("JSON path '{path}' not found"))
    }
}

impl ResponseEvaluator for TestRunner {
    fn evaluate(
        &self,
        case_name: &str,
        assertions: &[Assertion],
        response: &ResponseSpec,
    ) -> TestResults {
        let start = Instant::now();
        let results = assertions
            .iter()
            .map(|assertion| self.run_assertion(assertion, response).in_case(case_name))
            .collect();

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        TestResults::new(case_name, results, duration_ms)
    }
}

/// Compare two JSON values using the given operator.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    match operator {
        ComparisonOperator::Equals => actual == expected,
        ComparisonOperator::NotEquals => actual != expected,
        ComparisonOperator::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
        ComparisonOperator::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
        ComparisonOperator::LessThan => compare_numeric(actual, expected, |a, b| a < b),
        ComparisonOperator::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
        ComparisonOperator::Contains => match (actual, expected) {
            (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
            (Value::Array(arr), _) => arr.contains(expected),
            _ => false,
        },
        ComparisonOperator::Matches => {
            if let (Value::String(s), Value::String(pattern)) = (actual, expected) {
                Regex::new(pattern).is_ok_and(|re| re.is_match(s))
            } else {
                false
            }
        }
    }
}

/// Compare numeric values.
fn compare_numeric<F>(actual: &Value, expected: &Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn create_response(status: u16, body: &str, headers: HashMap<String, String>) -> ResponseSpec {
        ResponseSpec::new(status, headers, body.as_bytes())
    }

    #[test]
    fn test_status_code_exact() {
        let runner = TestRunner::new();
        let response = create_response(200, "", HashMap::new());

        let result = runner.run_assertion(&Assertion::status(200), &response);
        assert!(result.passed);
        assert_eq!(result.actual.as_deref(), Some("200"));

        let result = runner.run_assertion(&Assertion::status(201), &response);
        assert!(!result.passed);
    }

    #[test]
    fn test_status_code_failure_message() {
        let runner = TestRunner::new();
        let response = create_response(500, "{}", HashMap::new());

        let result = runner.run_assertion(&Assertion::status(200), &response);
        assert!(!result.passed);
        assert_eq!(
            result.error.as_deref(),
            Some("Expected status is 200, got 500 Internal Server Error")
        );
    }

    #[test]
    fn test_status_code_range() {
        let runner = TestRunner::new();
        let response = create_response(201, "", HashMap::new());

        let assertion = Assertion::StatusCode {
            expected: StatusExpectation::success(),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_header_exists() {
        let runner = TestRunner::new();
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), "req-1".to_string());
        let response = create_response(200, "", headers);

        let assertion = Assertion::HeaderExists {
            name: "x-request-id".to_string(),
            value: None,
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::HeaderExists {
            name: "X-Request-Id".to_string(),
            value: Some("req-2".to_string()),
        };
        assert!(!runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::HeaderExists {
            name: "X-Missing".to_string(),
            value: None,
        };
        assert!(!runner.run_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_header_matches() {
        let runner = TestRunner::new();
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), "req-42".to_string());
        let response = create_response(200, "", headers);

        let assertion = Assertion::HeaderMatches {
            name: "X-Request-Id".to_string(),
            pattern: r"req-\d+".to_string(),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::HeaderMatches {
            name: "X-Request-Id".to_string(),
            pattern: r"(".to_string(),
        };
        let result = runner.run_assertion(&assertion, &response);
        assert!(!result.passed);
        assert!(result.error.unwrap().starts_with("Invalid regex pattern"));
    }

    #[test]
    fn test_content_type() {
        let runner = TestRunner::new();
        let response = ResponseSpec::json(200, "{}");

        let assertion = Assertion::ContentType {
            expected: "application/json".to_string(),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let response = create_response(200, "{}", HashMap::new());
        assert!(!runner.run_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_body_contains() {
        let runner = TestRunner::new();
        let response = create_response(200, "Key Created", HashMap::new());

        let assertion = Assertion::BodyContains {
            text: "created".to_string(),
            ignore_case: true,
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::BodyContains {
            text: "created".to_string(),
            ignore_case: false,
        };
        assert!(!runner.run_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_is_json() {
        let runner = TestRunner::new();

        let response = ResponseSpec::json(200, r#"{"valid": true}"#);
        assert!(runner.run_assertion(&Assertion::IsJson, &response).passed);

        let response = ResponseSpec::json(200, "not json");
        assert!(!runner.run_assertion(&Assertion::IsJson, &response).passed);
    }

    #[test]
    fn test_json_path() {
        let runner = TestRunner::new();
        let response = ResponseSpec::json(200, r#"{"key_version": "v1", "identifier": {"id": "abc"}}"#);

        let assertion = Assertion::JsonPath {
            path: "$.identifier.id".to_string(),
            expected: Some(json!("abc")),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::JsonPath {
            path: "$.key_version".to_string(),
            expected: None,
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::JsonPath {
            path: "$.missing".to_string(),
            expected: None,
        };
        let result = runner.run_assertion(&assertion, &response);
        assert_eq!(result.error.as_deref(), Some("JSON path '$.missing' not found"));
    }

    #[test]
    fn test_json_path_on_invalid_body_fails_without_panicking() {
        let runner = TestRunner::new();
        let response = ResponseSpec::json(502, "<html>Bad Gateway</html>");

        let assertion = Assertion::JsonPath {
            path: "$.key_version".to_string(),
            expected: None,
        };
        let result = runner.run_assertion(&assertion, &response);
        assert!(!result.passed);
        assert!(result.error.unwrap().starts_with("Failed to parse body as JSON"));
    }

    #[test]
    fn test_json_path_matches() {
        let runner = TestRunner::new();
        let response = ResponseSpec::json(200, r#"{"count": 10, "tags": ["a", "b"]}"#);

        let assertion = Assertion::JsonPathMatches {
            path: "$.count".to_string(),
            operator: ComparisonOperator::GreaterThan,
            value: json!(5),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::JsonPathMatches {
            path: "$.count".to_string(),
            operator: ComparisonOperator::LessThan,
            value: json!(5),
        };
        assert!(!runner.run_assertion(&assertion, &response).passed);

        let assertion = Assertion::JsonPathMatches {
            path: "$.tags".to_string(),
            operator: ComparisonOperator::Contains,
            value: json!("b"),
        };
        assert!(runner.run_assertion(&assertion, &response).passed);
    }

    #[test]
    fn test_evaluate_labels_every_result() {
        let runner = TestRunner::new();
        let response = ResponseSpec::json(404, "Not Found");

        let results = runner.evaluate(
            "Create Key",
            &[Assertion::status(200), Assertion::IsJson],
            &response,
        );

        assert_eq!(results.total, 2);
        assert_eq!(results.failed, 2);
        let labels: Vec<_> = results.results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Create Key - Status code is 200", "Create Key - Body is valid JSON"]
        );
    }

    #[test]
    fn test_evaluate_without_assertions() {
        let results = TestRunner::new().evaluate("Empty", &[], &ResponseSpec::json(200, "{}"));
        assert!(results.all_passed());
        assert_eq!(results.total, 0);
    }
}
