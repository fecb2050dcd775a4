//! JSON body capturer.
//!
//! Parses the response body once, then applies each capture rule on its own:
//! a missing field writes the placeholder and the next rule still runs.

use keyprobe_application::ports::FieldCapturer;
use keyprobe_domain::{
    CaptureError, CaptureRule, CaptureSummary, JsonPath, ResponseSpec, RunEnvironment,
};
use serde_json::Value;
use tracing::debug;

/// Captures response body fields into the run environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCapturer;

impl JsonCapturer {
    /// Creates a new capturer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FieldCapturer for JsonCapturer {
    fn capture(
        &self,
        rules: &[CaptureRule],
        response: &ResponseSpec,
        env: &mut RunEnvironment,
    ) -> Result<CaptureSummary, CaptureError> {
        // Nothing may be written unless every rule and the body are usable.
        let paths: Vec<JsonPath> = rules
            .iter()
            .map(CaptureRule::validate)
            .collect::<Result<_, _>>()?;
        let body = response
            .body_json()
            .map_err(|e| CaptureError::InvalidBody(e.to_string()))?;

        let mut summary = CaptureSummary::default();
        for (rule, path) in rules.iter().zip(&paths) {
            match path.query(&body) {
                Some(value) if !value.is_null() => {
                    let stored = rule.encoding.encode(value);
                    debug!(key = %rule.target, source = %path, value = %stored, "captured");
                    env.set(rule.target.as_str(), stored)?;
                    summary.written.push(rule.target.clone());
                }
                found => {
                    let null = found.is_some_and(Value::is_null);
                    debug!(
                        key = %rule.target,
                        source = %path,
                        null,
                        "source absent, storing placeholder"
                    );
                    env.set_placeholder(rule.target.as_str())?;
                    summary.missing.push(rule.target.clone());
                }
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use keyprobe_domain::PLACEHOLDER;
    use pretty_assertions::assert_eq;

    fn create_key_rules() -> Vec<CaptureRule> {
        vec![
            CaptureRule::verbatim("$.key_version", "key_version"),
            CaptureRule::json("$.identifier", "identifier"),
        ]
    }

    fn capture(body: &str, env: &mut RunEnvironment) -> Result<CaptureSummary, CaptureError> {
        JsonCapturer::new().capture(&create_key_rules(), &ResponseSpec::json(200, body), env)
    }

    #[test]
    fn test_captures_scalar_and_structured_values() {
        let mut env = RunEnvironment::new();
        let summary = capture(r#"{"key_version": 1, "identifier": {"id": "abc"}}"#, &mut env).unwrap();

        assert_eq!(env.get("key_version"), Some("1"));
        assert_eq!(env.get("identifier"), Some(r#"{"id":"abc"}"#));
        assert_eq!(summary.written, vec!["key_version", "identifier"]);
        assert!(summary.is_complete());
    }

    #[test]
    fn test_string_key_version_is_stored_without_quotes() {
        let mut env = RunEnvironment::new();
        capture(r#"{"key_version": "v3", "identifier": "abc"}"#, &mut env).unwrap();

        assert_eq!(env.get("key_version"), Some("v3"));
        assert_eq!(env.get("identifier"), Some(r#""abc""#));
    }

    #[test]
    fn test_integral_float_key_version_is_stored_as_integer() {
        let mut env = RunEnvironment::new();
        capture(r#"{"key_version": 1.0, "identifier": {"version": 1.0}}"#, &mut env).unwrap();

        assert_eq!(env.get("key_version"), Some("1"));
        assert_eq!(env.get("identifier"), Some(r#"{"version":1.0}"#));
    }

    #[test]
    fn test_absent_and_null_fields_store_placeholder() {
        let mut env = RunEnvironment::new();
        let summary = capture(r#"{"key_version": 2, "identifier": null}"#, &mut env).unwrap();
        assert_eq!(env.get("key_version"), Some("2"));
        assert_eq!(env.get("identifier"), Some(PLACEHOLDER));
        assert_eq!(summary.missing, vec!["identifier"]);

        let mut env = RunEnvironment::new();
        capture(r#"{"key_version": 2}"#, &mut env).unwrap();
        assert_eq!(env.get("identifier"), Some(PLACEHOLDER));
        assert!(!env.is_provided("identifier"));
    }

    #[test]
    fn test_missing_field_does_not_undo_earlier_writes() {
        let mut env = RunEnvironment::new();
        capture(r#"{"identifier": {"id": "abc"}}"#, &mut env).unwrap();

        assert_eq!(env.get("key_version"), Some(PLACEHOLDER));
        assert_eq!(env.get("identifier"), Some(r#"{"id":"abc"}"#));
    }

    #[test]
    fn test_invalid_body_writes_nothing() {
        let mut env = RunEnvironment::with_values([("key_version", "old")]).unwrap();
        let err = capture("<html>oops</html>", &mut env).unwrap_err();

        assert!(matches!(err, CaptureError::InvalidBody(_)));
        assert_eq!(env.get("key_version"), Some("old"));
        assert!(!env.contains_key("identifier"));
    }

    #[test]
    fn test_invalid_rule_writes_nothing() {
        let mut env = RunEnvironment::new();
        let rules = vec![
            CaptureRule::verbatim("$.key_version", "key_version"),
            CaptureRule::verbatim("identifier", "identifier"),
        ];

        let err = JsonCapturer::new()
            .capture(&rules, &ResponseSpec::json(200, r#"{"key_version": 1}"#), &mut env)
            .unwrap_err();

        assert!(matches!(err, CaptureError::InvalidRule(_)));
        assert!(env.is_empty());
    }

    #[test]
    fn test_rule_stepping_past_wildcard_is_rejected() {
        let mut env = RunEnvironment::new();
        let rules = vec![CaptureRule::json("$.keys[*].id", "ids")];

        let err = JsonCapturer::new()
            .capture(
                &rules,
                &ResponseSpec::json(200, r#"{"keys": [{"id": 1}, {"id": 2}]}"#),
                &mut env,
            )
            .unwrap_err();

        assert!(matches!(err, CaptureError::InvalidRule(_)));
        assert!(!env.contains_key("ids"));
    }

    #[test]
    fn test_wildcard_rule_captures_whole_array() {
        let mut env = RunEnvironment::new();
        let rules = vec![CaptureRule::json("$.keys[*]", "keys")];

        JsonCapturer::new()
            .capture(&rules, &ResponseSpec::json(200, r#"{"keys": [1, 2]}"#), &mut env)
            .unwrap();

        assert_eq!(env.get("keys"), Some("[1,2]"));
    }

    #[test]
    fn test_non_object_body_yields_placeholders() {
        let mut env = RunEnvironment::new();
        let summary = capture("[1, 2, 3]", &mut env).unwrap();
        assert_eq!(summary.missing.len(), 2);
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_capturing_twice_is_idempotent() {
        let body = r#"{"key_version": 1, "identifier": {"id": "abc"}}"#;
        let mut env = RunEnvironment::new();
        capture(body, &mut env).unwrap();
        let first = env.clone();
        capture(body, &mut env).unwrap();
        assert_eq!(env, first);
    }

    #[test]
    fn test_placeholder_written_with_subscriber_installed() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut env = RunEnvironment::new();
            let summary = capture(r#"{"key_version": null}"#, &mut env).unwrap();
            assert_eq!(summary.missing, vec!["key_version", "identifier"]);
            assert_eq!(env.get("key_version"), Some(PLACEHOLDER));
        });
    }

    #[test]
    fn test_overwrites_previous_run_values() {
        let mut env = RunEnvironment::with_values([("key_version", "1")]).unwrap();
        capture(r#"{"key_version": 2, "identifier": {"id": "abc"}}"#, &mut env).unwrap();
        assert_eq!(env.get("key_version"), Some("2"));
    }
}
