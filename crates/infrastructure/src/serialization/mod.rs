//! Serialization of plan and recording files.
//!
//! JSON output is deterministic: sorted keys via `BTreeMap` in the source
//! types, 2-space indentation and a trailing newline. Definition files may
//! be JSON or YAML.

mod definitions;
mod json;

pub use definitions::{
    DefinitionError, DefinitionFormat, load_definition_file, load_test_plan, save_definition_file,
};
pub use json::{SerializationError, from_json, from_yaml, to_json_stable};
