//! Keyprobe Domain - Core contract-test types
//!
//! This crate defines the model for API contract tests: responses,
//! assertions, capture rules, test cases and the run environment.
//! All types here are pure Rust with no I/O dependencies.

pub mod capture;
pub mod environment;
pub mod error;
pub mod json_path;
pub mod report;
pub mod response;
pub mod test_case;
pub mod testing;

pub use capture::{CaptureEncoding, CaptureError, CaptureRule, CaptureSummary};
pub use environment::{PLACEHOLDER, RunEnvironment};
pub use error::{DomainError, DomainResult};
pub use json_path::{JsonPath, PathSegment};
pub use report::{CaptureStatus, RunReport, SkippedCase, TestCaseOutcome};
pub use response::{ResponseSpec, StatusCode};
pub use test_case::{RenderedRequest, RequestTemplate, RunPolicy, TestCase, TestPlan};
pub use testing::{
    Assertion, AssertionResult, ComparisonOperator, StatusExpectation, TestResults,
};
