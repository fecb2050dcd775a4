//! Response field capture.

mod json_capturer;

pub use json_capturer::JsonCapturer;
