//! Response source port
//!
//! The boundary to whatever issues HTTP requests. Transport, retries and
//! authentication live behind it.

use keyprobe_domain::{RenderedRequest, ResponseSpec, TestCase};

use crate::error::ApplicationResult;

/// Supplies the completed response for each test case of a run.
pub trait ResponseSource {
    /// Returns the response to `case`, given its rendered request if it has one.
    ///
    /// An error response (4xx, 5xx) is still a response and must be returned
    /// as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error when no response could be obtained at all.
    fn response_for(
        &mut self,
        case: &TestCase,
        request: Option<&RenderedRequest>,
    ) -> ApplicationResult<ResponseSpec>;
}
