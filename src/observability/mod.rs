//! Observability
//!
//! Structured JSON logging for the daemon. One line per event,
//! synchronous, deterministic field ordering, so log output is greppable
//! and stable across runs.

mod logger;

pub use logger::{Logger, Severity};
