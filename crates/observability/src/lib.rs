//! Tracing and logging setup shared by every process embedding the
//! reconciliation core.

/// Initialize process-wide logging with the default `info` filter.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    logging::init("info");
}

/// Subscriber configuration (filters, formatting).
pub mod logging;
