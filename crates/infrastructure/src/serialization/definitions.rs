//! Definition files on disk.
//!
//! A definition file holds a [`TestPlan`], a set of recorded responses or
//! any other serde type. The format follows the file extension.

use std::fs;
use std::path::{Path, PathBuf};

use keyprobe_domain::{DomainError, TestPlan};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::json::{SerializationError, from_json, from_yaml, to_json_stable};

/// Errors that can occur while loading or saving definition files.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The file could not be read or written.
    #[error("cannot access '{path}': {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported definition file '{0}': expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),

    /// The content does not match the expected shape.
    #[error("invalid definition file '{path}': {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SerializationError,
    },

    /// A loaded plan contains an invalid case.
    #[error("invalid test plan '{path}': {source}")]
    InvalidPlan {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: DomainError,
    },
}

/// Supported definition file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DefinitionFormat {
    /// Detects the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Loads a definition file, choosing the parser by extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or its content does not deserialize into `T`.
pub fn load_definition_file<T: DeserializeOwned>(path: &Path) -> Result<T, DefinitionError> {
    let format = DefinitionFormat::from_path(path)
        .ok_or_else(|| DefinitionError::UnsupportedFormat(path.to_path_buf()))?;
    let content = fs::read_to_string(path).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), ?format, "loading definition file");
    let parsed = match format {
        DefinitionFormat::Json => from_json(&content),
        DefinitionFormat::Yaml => from_yaml(&content),
    };
    parsed.map_err(|source| DefinitionError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a [`TestPlan`] and validates every case in it.
///
/// # Errors
///
/// Returns the errors of [`load_definition_file`], or
/// [`DefinitionError::InvalidPlan`] if a case is invalid.
pub fn load_test_plan(path: &Path) -> Result<TestPlan, DefinitionError> {
    let plan: TestPlan = load_definition_file(path)?;
    plan.validate().map_err(|source| DefinitionError::InvalidPlan {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(plan)
}

/// Writes `value` to `path` in the format given by its extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, serialization fails,
/// or the file cannot be written.
pub fn save_definition_file<T: Serialize>(path: &Path, value: &T) -> Result<(), DefinitionError> {
    let format = DefinitionFormat::from_path(path)
        .ok_or_else(|| DefinitionError::UnsupportedFormat(path.to_path_buf()))?;
    let content = match format {
        DefinitionFormat::Json => to_json_stable(value),
        DefinitionFormat::Yaml => serde_yaml::to_string(value).map_err(SerializationError::from),
    }
    .map_err(|source| DefinitionError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, content).map_err(|source| DefinitionError::Io {
        path: path.to_path_buf(),
        source,
    })
}
