//! Application use cases (test execution orchestration).

mod run_sequence;
mod run_test_case;
#[cfg(test)]
pub(crate) mod test_support;

pub use run_sequence::*;
pub use run_test_case::*;
