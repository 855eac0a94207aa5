//! Diagnostic channel setup.
//!
//! Log events go to stderr so stdout stays reserved for the output channel.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "EXTAUDIT_LOG";

/// Filter used when `EXTAUDIT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the global subscriber. A second call is a no-op.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init();
        init();
        tracing::warn!("logging initialized");
    }
}
