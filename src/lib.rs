//! Terminal stopwatch for tracking what you work on. Name an activity, start, pause and stop
//! the timer, and finished activities are appended to a log that persists between sessions.
//!

pub mod cli;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod utils;
