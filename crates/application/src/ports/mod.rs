//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the test-case core and its
//! collaborators. Each port is a trait implemented by adapters in the
//! infrastructure layer.

mod capturer;
mod clock;
mod evaluator;
mod reporter;
mod response_source;

pub use capturer::FieldCapturer;
pub use clock::Clock;
pub use evaluator::ResponseEvaluator;
pub use reporter::ResultReporter;
pub use response_source::ResponseSource;
