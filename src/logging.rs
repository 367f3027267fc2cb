use tracing_subscriber::EnvFilter;

pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

const FALLBACK_LEVEL: &str = "info";

/// Installs the stderr fmt subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => level_filter(default_level),
    };
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
    if let Some(level) = rejected {
        tracing::warn!(level = %level, "invalid log level, using {}", FALLBACK_LEVEL);
    }
}

/// Filter for one of `LOG_LEVELS`; anything else falls back to info and is
/// returned so the caller can report it.
pub fn level_filter(level: &str) -> (EnvFilter, Option<String>) {
    let known = LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str());
    match EnvFilter::try_new(level) {
        Ok(filter) if known => (filter, None),
        _ => (EnvFilter::new(FALLBACK_LEVEL), Some(level.to_string())),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/logging.rs"]
mod tests;
