//! JSON log subscriber driven by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Install a JSON fmt subscriber.
///
/// `RUST_LOG` wins when set and parseable; otherwise `default_directives` is
/// used (e.g. `"info"` or `"packstock_inventory=debug"`). Returns `false` when
/// a global subscriber was already installed.
pub fn init(default_directives: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(default_directives, "log subscriber installed");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_no_op() {
        let _ = init("warn");
        assert!(!init("debug"));
    }
}
