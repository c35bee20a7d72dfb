//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library code only emits `tracing` events. The binary installs a subscriber
//! once at startup with [`init_logging`]; tests never install one.
//!
//! # Level Resolution
//!
//! 1. `-v/--verbose` selects `debug`
//! 2. otherwise the `LOG_LEVEL` environment variable
//! 3. otherwise `info`
//!
//! `RUST_LOG`, when set to a valid filter, replaces the whole filter.

use std::io;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the default log level
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level for this crate's events.
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            with_ansi: false,
        }
    }
}

impl LogConfig {
    /// Resolve the level from the verbose flag and an optional `LOG_LEVEL` value.
    #[must_use]
    pub fn resolve(verbose: bool, env_level: Option<&str>) -> Self {
        let level = if verbose {
            Level::DEBUG
        } else {
            env_level.and_then(parse_level).unwrap_or(Level::INFO)
        };
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolve the level from the verbose flag and the process environment.
    #[must_use]
    pub fn from_env(verbose: bool) -> Self {
        let env_level = std::env::var(LOG_LEVEL_ENV).ok();
        Self::resolve(verbose, env_level.as_deref())
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Parse a level name, case-insensitively
///
/// Besides the `tracing` names, accepts `warning` and `critical`.
pub fn parse_level(value: &str) -> Option<Level> {
    match value.trim().to_ascii_lowercase().as_str() {
        "warning" => Some(Level::WARN),
        "critical" | "fatal" => Some(Level::ERROR),
        other => Level::from_str(other).ok(),
    }
}

/// Initialize the global tracing subscriber, writing to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi);

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .try_init()
        .map_err(io::Error::other)
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG` env var.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    // External crates stay at warn level to reduce noise
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,csv2iif={}", level_str)))
}
