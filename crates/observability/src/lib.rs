//! Tracing/logging setup shared by the service binary and tests.

/// Subscriber configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::{init, init_with, LogFormat};
