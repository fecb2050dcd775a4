//! JSON and YAML helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// YAML deserialization failed.
    #[error("YAML deserialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}

/// Deserializes YAML from a string.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or doesn't match the expected type.
pub fn from_yaml<T: DeserializeOwned>(yaml: &str) -> Result<T, SerializationError> {
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use keyprobe_domain::{RunPolicy, TestPlan};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stable_serialization_layout() {
        let json = to_json_stable(&RunPolicy::default()).expect("serialization should work");
        assert_eq!(json, "{\n  \"stop_on_failure\": false\n}\n");
    }

    #[test]
    fn test_plan_from_yaml() {
        let yaml = r"
policy:
  stop_on_failure: true
cases:
  - name: Create Key
    assertions:
      - type: status_code
        expected: 200
    captures:
      - source: $.key_version
        target: key_version
      - source: $.identifier
        target: identifier
        encoding: json
";
        let plan: TestPlan = from_yaml(yaml).expect("plan should parse");
        assert!(plan.policy.stop_on_failure);
        assert_eq!(plan.cases[0].name, "Create Key");
        assert_eq!(plan.cases[0].captures.len(), 2);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_invalid_input() {
        let result: Result<TestPlan, _> = from_json(r#"{"cases": }"#);
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
