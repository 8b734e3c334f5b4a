//! Diagnostic logging setup
//!
//! Logs go to stderr so command output on stdout stays clean for piping. The
//! filter comes from `FAMILY_EXPENSES_LOG`, then `RUST_LOG`, then the
//! `log_level` setting.

use std::env;
use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding an explicit log filter
pub const LOG_ENV: &str = "FAMILY_EXPENSES_LOG";

/// Pick the filter directive, first non-empty source wins
pub fn filter_directive(app_env: Option<String>, rust_log: Option<String>, fallback: &str) -> String {
    [app_env, rust_log]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(fallback_level: &str) {
    let directive = filter_directive(
        env::var(LOG_ENV).ok(),
        env::var("RUST_LOG").ok(),
        fallback_level,
    );

    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("Warning: invalid log filter '{}': {}. Using 'warn'.", directive, e);
        EnvFilter::new("warn")
    });

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    if tracing_subscriber::registry().with(fmt_layer).try_init().is_ok() {
        tracing::debug!(filter = %directive, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(
            filter_directive(Some("debug".into()), Some("info".into()), "warn"),
            "debug"
        );
        assert_eq!(filter_directive(None, Some("info".into()), "warn"), "info");
        assert_eq!(filter_directive(Some("  ".into()), None, "warn"), "warn");
        assert_eq!(filter_directive(None, None, "error"), "error");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("warn");
        init("debug");
    }
}
