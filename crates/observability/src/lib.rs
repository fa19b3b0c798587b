//! Tracing/logging setup shared by every roster binary.

/// Initialize process-wide tracing with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::Json);
}

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use crate::tracing::LogFormat;
