//! # Logging
//!
//! Structured logging for the `facadegen` binary, built on `tracing-subscriber`.
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary (or the embedding host).
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: full filter directives, takes precedence when set
//! - `FACADEGEN_LOG_LEVEL`: `trace`, `debug`, `info` (default), `warn`, `error`
//! - `FACADEGEN_LOG_FORMAT`: `pretty` (default) or `json`
//!
//! Output goes to stderr so generated text and reports on stdout stay clean.

use anyhow::Context;
use std::env;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub log_level: String,
    pub format: LogFormat,
    /// Include source file and line in each event
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_level: "info".to_string(),
            format: LogFormat::Pretty,
            include_location: false,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("FACADEGEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("FACADEGEN_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            ),
            include_location: env::var("FACADEGEN_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Level used when `RUST_LOG` is not set
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Raise the level for `--verbose`.
    pub fn verbose(mut self) -> Self {
        if self.level() > Level::DEBUG {
            return self;
        }
        self.log_level = "debug".to_string();
        self
    }
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level().as_str()));

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_defaults_to_pretty() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }

    #[test]
    fn test_level_parse() {
        let config = LogConfig {
            log_level: "WARN".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(config.level(), Level::WARN);
        assert_eq!(LogConfig::default().level(), Level::INFO);
    }

    #[test]
    fn test_verbose_only_raises() {
        assert_eq!(LogConfig::default().verbose().level(), Level::DEBUG);
        let trace = LogConfig {
            log_level: "trace".to_string(),
            ..LogConfig::default()
        };
        assert_eq!(trace.verbose().level(), Level::TRACE);
    }
}
