//! Test helpers module
//!
//! This module provides utilities and helpers for testing EventDesk.
//! It includes a mock backend server, test data builders and test context setup.

pub mod backend_mock;
pub mod test_context;
pub mod test_data;
pub mod xlsx;

pub use backend_mock::*;
pub use test_context::*;
pub use test_data::*;
pub use xlsx::*;
