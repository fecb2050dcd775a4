//! JSON path expressions over response bodies.
//!
//! Supports the subset of JSONPath that contract tests need:
//! `$`, `$.field`, `$.field.nested`, `$.array[0]`, `$.array[*]`.

use std::fmt;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member access.
    Field(String),
    /// Array element access.
    Index(usize),
    /// Every element of an array (`[*]`), yields the array itself. Only
    /// valid as the last step.
    Wildcard,
}

/// A parsed JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Parses a path expression such as `$.identifier` or `$.items[0].id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidJsonPath`] when the expression does not
    /// start with `$`, contains a malformed bracket access, or continues
    /// after a `[*]` step.
    pub fn parse(path: &str) -> DomainResult<Self> {
        let raw = path.trim();
        let Some(rest) = raw.strip_prefix('$') else {
            return Err(invalid(raw, "JSON path must start with '$'"));
        };
        let rest = rest.strip_prefix('.').unwrap_or(rest);

        let mut segments = Vec::new();
        for token in split_path_segments(rest) {
            parse_segment(raw, &token, &mut segments)?;
        }
        if let Some(position) = segments.iter().position(|s| *s == PathSegment::Wildcard)
            && position + 1 < segments.len()
        {
            return Err(invalid(raw, "'[*]' must be the last step of the path"));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the expression as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Looks the path up in `json`.
    ///
    /// Returns `None` when any step is absent. A JSON `null` stored under the
    /// path is returned as `Some(Value::Null)`.
    #[must_use]
    pub fn query<'a>(&self, json: &'a Value) -> Option<&'a Value> {
        let mut current = json;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Field(name) => current.get(name.as_str())?,
                PathSegment::Index(index) => current.get(*index)?,
                PathSegment::Wildcard => current.is_array().then_some(current)?,
            };
        }
        Some(current)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidJsonPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Split a path into segments, respecting array brackets.
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for ch in path.chars() {
        match ch {
            '.' if !in_bracket => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                in_bracket = true;
                current.push(ch);
            }
            ']' => {
                in_bracket = false;
                current.push(ch);
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Parse `name`, `name[0]`, `name[0][1]` or `[*]` into segments.
fn parse_segment(raw: &str, token: &str, out: &mut Vec<PathSegment>) -> DomainResult<()> {
    let (name, mut brackets) = token
        .find('[')
        .map_or((token, ""), |start| (&token[..start], &token[start..]));

    if !name.is_empty() {
        out.push(PathSegment::Field(name.to_string()));
    }

    while !brackets.is_empty() {
        let Some(inner_end) = brackets.find(']') else {
            return Err(invalid(raw, format!("unclosed bracket in '{token}'")));
        };
        if !brackets.starts_with('[') {
            return Err(invalid(raw, format!("unexpected text in '{token}'")));
        }
        let index = brackets[1..inner_end].trim();
        if index == "*" {
            out.push(PathSegment::Wildcard);
        } else {
            let idx = index
                .parse::<usize>()
                .map_err(|_| invalid(raw, format!("invalid array index: {index}")))?;
            out.push(PathSegment::Index(idx));
        }
        brackets = &brackets[inner_end + 1..];
    }

    Ok(())
}
