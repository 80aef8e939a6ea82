//! Shared utilities for Roll Call.
//!
//! Logger initialization and timestamp formatting used by the server
//! binary and its tests.

pub mod logger;
pub mod time;
