//! Gantry: Progress-Instrumented Build Connections
//!
//! A connection layer for remote build execution that surfaces operation
//! progress to callers without the backend knowing anyone is watching.

pub mod connection;
pub mod error;
pub mod logging;
pub mod progress;
pub mod types;
