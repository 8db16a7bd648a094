//! Tracing subscriber setup
//!
//! Diagnostics go through `tracing` to stderr. The filter is taken from, in
//! order: the `--log-level` flag, `RUST_LOG`, the config file, then `info`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Resolve the filter directive to use.
pub fn resolve_filter(flag: Option<&str>, env: Option<&str>, config: &str) -> String {
    flag.filter(|s| !s.is_empty())
        .or(env.filter(|s| !s.is_empty()))
        .unwrap_or(if config.is_empty() { "info" } else { config })
        .to_string()
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(flag: Option<&str>, config_level: &str) {
    let env = std::env::var("RUST_LOG").ok();
    let directive = resolve_filter(flag, env.as_deref(), config_level);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        assert_eq!(resolve_filter(Some("debug"), Some("warn"), "error"), "debug");
    }

    #[test]
    fn test_env_before_config() {
        assert_eq!(resolve_filter(None, Some("warn"), "error"), "warn");
    }

    #[test]
    fn test_config_then_default() {
        assert_eq!(resolve_filter(None, None, "error"), "error");
        assert_eq!(resolve_filter(None, Some(""), ""), "info");
    }
}
