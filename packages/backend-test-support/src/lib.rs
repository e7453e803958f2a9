//! Backend test support utilities
//!
//! Unified logging initialization, problem-details assertions and unique
//! test data helpers shared by the backend integration tests.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
