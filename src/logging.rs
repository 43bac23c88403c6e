//! Tracing subscriber setup for the binary.
//!
//! Output goes to stderr so streamed replies on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Filter variable checked before `RUST_LOG`
pub const ENV_LOG: &str = "EXPO_CHAT_LOG";

/// Filter used when neither variable is set
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `EXPO_CHAT_LOG`, then `RUST_LOG`, then the default.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_does_not_panic() {
        init_tracing();
        init_tracing();
    }
}
