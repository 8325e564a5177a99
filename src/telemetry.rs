//! Structured logging set-up.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG`, when set, overrides `default_filter`. Log lines go to
/// standard error. Returns `false` when a subscriber was already installed,
/// which is not an error.
#[must_use]
pub fn init(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn second_installation_is_reported_not_fatal() {
        let _first = init("debug");

        assert!(!init("info"));
    }
}
