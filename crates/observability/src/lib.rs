//! Tracing and logging setup shared by the gateway binary and tests.

pub use self::tracing::LogFormat;

/// Initialize process-wide observability (tracing/logging) in `format`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
