//! Field capture port

use keyprobe_domain::{CaptureError, CaptureRule, CaptureSummary, ResponseSpec, RunEnvironment};

/// Copies response body fields into the run environment.
pub trait FieldCapturer {
    /// Applies `rules` in order.
    ///
    /// # Errors
    ///
    /// Returns an error, with nothing written, when the body does not parse
    /// or a rule is malformed. Once the body parsed, a missing field writes
    /// the placeholder and is not an error.
    fn capture(
        &self,
        rules: &[CaptureRule],
        response: &ResponseSpec,
        env: &mut RunEnvironment,
    ) -> Result<CaptureSummary, CaptureError>;
}
