//! Port adapters.

mod recorded_responses;
mod system_clock;

pub use recorded_responses::RecordedResponses;
pub use system_clock::SystemClock;
