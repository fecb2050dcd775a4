//! Result reporters.
//!
//! `TracingReporter` emits each result as a log event, `CollectingReporter`
//! keeps them in memory for the caller to aggregate.

mod collecting;
mod tracing_reporter;

pub use collecting::CollectingReporter;
pub use tracing_reporter::TracingReporter;
