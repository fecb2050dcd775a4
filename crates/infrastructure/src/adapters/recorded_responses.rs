//! Response source backed by recorded responses.
//!
//! Responses are keyed by test case name and handed out in recording order,
//! so a plan that runs the same case twice needs two recordings.

use std::collections::{BTreeMap, VecDeque};

use keyprobe_application::ports::ResponseSource;
use keyprobe_application::{ApplicationError, ApplicationResult};
use keyprobe_domain::{RenderedRequest, ResponseSpec, TestCase};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Recorded responses per test case name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordedResponses {
    responses: BTreeMap<String, VecDeque<ResponseSpec>>,
}

impl RecordedResponses {
    /// Creates an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a response for `case_name`.
    pub fn insert(&mut self, case_name: impl Into<String>, response: ResponseSpec) {
        self.responses
            .entry(case_name.into())
            .or_default()
            .push_back(response);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, case_name: impl Into<String>, response: ResponseSpec) -> Self {
        self.insert(case_name, response);
        self
    }

    /// Number of responses not handed out yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.values().map(VecDeque::len).sum()
    }
}

impl ResponseSource for RecordedResponses {
    fn response_for(
        &mut self,
        case: &TestCase,
        request: Option<&RenderedRequest>,
    ) -> ApplicationResult<ResponseSpec> {
        if let Some(request) = request {
            debug!(
                case = %case.name,
                method = %request.method,
                path = %request.path,
                "replaying recorded response"
            );
        }

        self.responses
            .get_mut(&case.name)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| ApplicationError::MissingResponse(case.name.clone()))
    }
}
