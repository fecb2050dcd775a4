//! Capture rules.
//!
//! A capture rule copies one field of a JSON response body into the run
//! environment so that later test cases can reuse it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::environment::is_valid_key;
use crate::error::{DomainError, DomainResult};
use crate::json_path::JsonPath;

/// How a captured JSON value becomes a stored string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureEncoding {
    /// Strings are stored without quotes, everything else as compact JSON.
    #[default]
    Verbatim,
    /// Always the compact JSON text, strings keep their quotes.
    Json,
}

impl CaptureEncoding {
    /// Encodes `value` for storage.
    ///
    /// `null` becomes `"null"` under both encodings, which is also the
    /// environment placeholder. Under `Verbatim` an integral float such as
    /// `1.0` is stored as `1`.
    #[must_use]
    pub fn encode(self, value: &Value) -> String {
        match (self, value) {
            (Self::Verbatim, Value::String(s)) => s.clone(),
            (Self::Verbatim, Value::Number(n)) => {
                integral_float(n).unwrap_or_else(|| n.to_string())
            }
            _ => value.to_string(),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// `1.0` as `"1"`, `None` for integers and fractional values.
#[allow(clippy::cast_possible_truncation)]
fn integral_float(n: &serde_json::Number) -> Option<String> {
    if !n.is_f64() {
        return None;
    }
    let f = n.as_f64()?;
    (f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER).then(|| (f as i64).to_string())
}

/// Copies the value at `source` into the environment under `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRule {
    /// JSON path into the response body (e.g. `$.key_version`).
    pub source: String,
    /// Environment key to write.
    pub target: String,
    /// Storage encoding.
    #[serde(default)]
    pub encoding: CaptureEncoding,
}

impl CaptureRule {
    /// A rule storing the value as-is.
    #[must_use]
    pub fn verbatim(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            encoding: CaptureEncoding::Verbatim,
        }
    }

    /// A rule storing the value's JSON text.
    #[must_use]
    pub fn json(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            encoding: CaptureEncoding::Json,
        }
    }

    /// Checks the rule and returns its parsed source path.
    ///
    /// # Errors
    ///
    /// Fails on a malformed source path or an unusable target key.
    pub fn validate(&self) -> DomainResult<JsonPath> {
        if !is_valid_key(&self.target) {
            return Err(DomainError::InvalidEnvironmentKey(self.target.clone()));
        }
        JsonPath::parse(&self.source)
    }
}

/// What one capture step wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSummary {
    /// Keys written with a real value.
    pub written: Vec<String>,
    /// Keys written with the placeholder because the source was absent or null.
    pub missing: Vec<String>,
}

impl CaptureSummary {
    /// Returns true if every rule found its source field.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Why a capture step wrote nothing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),

    /// A capture rule is malformed.
    #[error("invalid capture rule: {0}")]
    InvalidRule(#[from] DomainError),
}
