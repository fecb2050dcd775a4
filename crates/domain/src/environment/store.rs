//! The run environment store
//!
//! String keys to string values, owned by one test run and passed by
//! `&mut` into every test case in execution order. Last writer wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::parse_references;
use crate::error::{DomainError, DomainResult};

/// Value stored for a captured field that was absent or JSON `null`.
///
/// Readers treat it as "not provided".
pub const PLACEHOLDER: &str = "null";

/// Returns true if `key` can be stored and referenced from templates.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty() && !key.contains("{{") && !key.contains("}}")
}

/// Run-scoped key/value state shared across ordered test cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEnvironment {
    /// Identifier of the run that owns this store.
    pub run_id: Uuid,
    #[serde(default)]
    values: BTreeMap<String, String>,
}

impl Default for RunEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl RunEnvironment {
    /// Creates an empty store for a new run.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            values: BTreeMap::new(),
        }
    }

    /// Creates a store seeded with initial values (e.g. a base URL).
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEnvironmentKey`] for an unusable key.
    pub fn with_values<I, K, V>(values: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut env = Self::new();
        for (key, value) in values {
            env.set(key, value)?;
        }
        Ok(env)
    }

    /// Writes `value` under `key`, returning the value it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEnvironmentKey`] for an unusable key.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<Option<String>> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(DomainError::InvalidEnvironmentKey(key));
        }
        Ok(self.values.insert(key, value.into()))
    }

    /// Writes the "not provided" placeholder under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidEnvironmentKey`] for an unusable key.
    pub fn set_placeholder(&mut self, key: impl Into<String>) -> DomainResult<Option<String>> {
        self.set(key, PLACEHOLDER)
    }

    /// Returns the raw stored value, placeholder included.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the stored value unless it is missing or the placeholder.
    #[must_use]
    pub fn get_provided(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| *v != PLACEHOLDER)
    }

    /// Returns true if `key` holds a real value.
    #[must_use]
    pub fn is_provided(&self, key: &str) -> bool {
        self.get_provided(key).is_some()
    }

    /// Returns true if anything, placeholder included, was written under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes `key`.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of keys written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Substitutes `{{key}}` references with provided values.
    ///
    /// References to unknown keys or to placeholder values are left as written
    /// so the consumer can see what was not provided.
    #[must_use]
    pub fn resolve(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for reference in parse_references(template) {
            if let Some(value) = self.get_provided(&reference.name) {
                output.push_str(&template[last..reference.span.start]);
                output.push_str(value);
                last = reference.span.end;
            }
        }

        output.push_str(&template[last..]);
        output
    }

    /// Lists the keys a template references that are not provided.
    #[must_use]
    pub fn unresolved(&self, template: &str) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for reference in parse_references(template) {
            if !self.is_provided(&reference.name) && !missing.contains(&reference.name) {
                missing.push(reference.name);
            }
        }
        missing
    }
}
