//! Shared utilities for validator-set elections.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
