//! Run-scoped environment shared by the test cases of one run

mod store;
mod template;

pub use store::{PLACEHOLDER, RunEnvironment, is_valid_key};
pub use template::{TemplateReference, parse_references};
