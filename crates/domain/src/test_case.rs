//! Test case definitions.
//!
//! A test case is one assertion-and-capture unit evaluated against a single
//! response. A plan is an ordered list of them plus the run policy.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::capture::CaptureRule;
use crate::environment::RunEnvironment;
use crate::error::{DomainError, DomainResult};
use crate::json_path::JsonPath;
use crate::testing::Assertion;

fn generate_id() -> Uuid {
    Uuid::now_v7()
}

/// The request a test case describes, with `{{key}}` references into the
/// run environment. Sending it is the HTTP client's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method.
    pub method: String,
    /// Path relative to the service base URL.
    pub path: String,
    /// Body template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestTemplate {
    /// A POST request with a body.
    #[must_use]
    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            path: path.into(),
            body: Some(body.into()),
        }
    }

    /// Resolves every template against the environment.
    #[must_use]
    pub fn render(&self, env: &RunEnvironment) -> RenderedRequest {
        let mut unresolved = env.unresolved(&self.path);
        if let Some(body) = &self.body {
            for name in env.unresolved(body) {
                if !unresolved.contains(&name) {
                    unresolved.push(name);
                }
            }
        }

        RenderedRequest {
            method: self.method.clone(),
            path: env.resolve(&self.path),
            body: self.body.as_deref().map(|b| env.resolve(b)),
            unresolved,
        }
    }
}

/// A request template after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    /// HTTP method.
    pub method: String,
    /// Resolved path.
    pub path: String,
    /// Resolved body.
    pub body: Option<String>,
    /// Keys referenced but not provided by earlier cases.
    pub unresolved: Vec<String>,
}

impl RenderedRequest {
    /// Returns true if every reference was substituted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// One assertion-and-capture unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique identifier.
    #[serde(default = "generate_id")]
    pub id: Uuid,
    /// Name used as the label prefix of every result.
    pub name: String,
    /// The request this case checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestTemplate>,
    /// Assertions, evaluated in order.
    #[serde(default)]
    pub assertions: Vec<Assertion>,
    /// Capture rules, applied in order after the assertions.
    #[serde(default)]
    pub captures: Vec<CaptureRule>,
}

impl TestCase {
    /// Create a new empty test case.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            request: None,
            assertions: Vec::new(),
            captures: Vec::new(),
        }
    }

    /// Set the request template (builder pattern).
    #[must_use]
    pub fn with_request(mut self, request: RequestTemplate) -> Self {
        self.request = Some(request);
        self
    }

    /// Add an assertion (builder pattern).
    #[must_use]
    pub fn with_assertion(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Add a capture rule (builder pattern).
    #[must_use]
    pub fn with_capture(mut self, rule: CaptureRule) -> Self {
        self.captures.push(rule);
        self
    }

    /// Checks the definition before it is run.
    ///
    /// # Errors
    ///
    /// Fails on an empty name, a malformed JSON path in an assertion or
    /// capture rule, an unusable target key, or two rules writing one key.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyTestCaseName);
        }

        for path in self.assertions.iter().filter_map(Assertion::json_path) {
            JsonPath::parse(path)?;
        }

        let mut targets: Vec<&str> = Vec::with_capacity(self.captures.len());
        for rule in &self.captures {
            rule.validate()?;
            if targets.contains(&rule.target.as_str()) {
                return Err(DomainError::DuplicateCaptureTarget(rule.target.clone()));
            }
            targets.push(&rule.target);
        }

        Ok(())
    }
}

/// Whether a failed test case halts the rest of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPolicy {
    /// Skip the remaining cases after the first failed one.
    #[serde(default)]
    pub stop_on_failure: bool,
}

/// An ordered list of test cases run against one environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    /// Run policy.
    #[serde(default)]
    pub policy: RunPolicy,
    /// Cases in execution order.
    #[serde(default)]
    pub cases: Vec<TestCase>,
}

impl TestPlan {
    /// Validates every case.
    ///
    /// # Errors
    ///
    /// Returns the first case error found.
    pub fn validate(&self) -> DomainResult<()> {
        self.cases.iter().try_for_each(TestCase::validate)
    }
}
