//! Keyprobe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (evaluation, capture, reporting, responses, clock)
//! - Use case orchestration for single test cases and ordered runs
//! - The built-in key-management test case catalog

pub mod catalog;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, FieldCapturer, ResponseEvaluator, ResponseSource, ResultReporter};
pub use use_cases::{RunSequence, RunTestCase};
