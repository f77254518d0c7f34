//! Tracing/logging setup shared by pantry binaries.

/// Environment-driven logging configuration.
pub mod config;

/// Tracing subscriber initialization.
pub mod tracing;

pub use config::{LogFormat, ObservabilityConfig};

/// Initialize process-wide logging from the environment.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&ObservabilityConfig::from_env());
}
