//! Built-in test cases for the key-management service.
//!
//! `Create Key` posts an identifier to `/key/create`, expects 200 and keeps
//! the returned `key_version` and `identifier` for the cases that follow.
//! `Rotate Key` posts the captured identifier back to `/key/rotate`.
//!
//! The create request reads `key_identifier` from the run environment, so
//! seed it before the run.

use keyprobe_domain::{
    Assertion, CaptureRule, RequestTemplate, RunPolicy, TestCase, TestPlan,
};

/// Name of the create case, also the label prefix of its results.
pub const CREATE_KEY: &str = "Create Key";

/// Name of the rotate case.
pub const ROTATE_KEY: &str = "Rotate Key";

/// The create-key contract: status 200, then capture `key_version` as-is and
/// `identifier` as JSON text.
#[must_use]
pub fn create_key() -> TestCase {
    TestCase::new(CREATE_KEY)
        .with_request(RequestTemplate::post(
            "/key/create",
            r#"{"data_identifier":"User","key_identifier":"{{key_identifier}}"}"#,
        ))
        .with_assertion(Assertion::status(200))
        .with_capture(CaptureRule::verbatim("$.key_version", "key_version"))
        .with_capture(CaptureRule::json("$.identifier", "identifier"))
}

/// The rotate-key contract, depending on `identifier` from [`create_key`].
#[must_use]
pub fn rotate_key() -> TestCase {
    TestCase::new(ROTATE_KEY)
        .with_request(RequestTemplate::post("/key/rotate", "{{identifier}}"))
        .with_assertion(Assertion::status(200))
        .with_capture(CaptureRule::verbatim("$.key_version", "key_version"))
}

/// Create then rotate, continuing past failures.
#[must_use]
pub fn key_lifecycle() -> TestPlan {
    TestPlan {
        policy: RunPolicy::default(),
        cases: vec![create_key(), rotate_key()],
    }
}
