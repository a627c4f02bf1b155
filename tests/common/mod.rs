#![allow(dead_code)]

pub use rollsim_test_utils::builders;
pub use rollsim_test_utils::{init_tracing, with_timeout, RecordingReporter};
