//! Keyprobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod capture;
pub mod reporting;
pub mod serialization;
pub mod testing;

pub use adapters::{RecordedResponses, SystemClock};
pub use capture::JsonCapturer;
pub use reporting::{CollectingReporter, TracingReporter};
pub use serialization::{
    DefinitionError, DefinitionFormat, SerializationError, from_json, from_yaml,
    load_definition_file, load_test_plan, save_definition_file, to_json_stable,
};
pub use testing::TestRunner;
