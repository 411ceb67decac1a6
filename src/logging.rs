//! Structured logging bootstrap
//!
//! Installs a `tracing-subscriber` registry for binaries that embed the CORS
//! engine. Libraries only emit events; calling [`init_logging_with_config`]
//! is the host's choice.
//!
//! ## Environment Variables
//!
//! - `BRRTR_LOG_LEVEL` - trace/debug/info/warn/error (default `info`)
//! - `BRRTR_LOG_FORMAT` - `json` or `pretty` (default `json`)
//! - `BRRTR_LOG_TARGET_FILTER` - extra comma-separated filter directives,
//!   e.g. `brrtcors::denial=debug`
//! - `BRRTR_LOG_INCLUDE_LOCATION` - include file:line (default `false`)
//! - `BRRTR_LOG_ASYNC` - buffer output on a background thread (default `false`)
//! - `BRRTR_LOG_WRITER` - `stdout` or `stderr` (default `stdout`)
//!
//! `RUST_LOG`, when set, takes precedence over `BRRTR_LOG_LEVEL`.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Stream that receives formatted log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWriter {
    Stdout,
    Stderr,
}

impl LogWriter {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "stderr" => LogWriter::Stderr,
            _ => LogWriter::Stdout,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
    /// Write through a non-blocking background writer
    pub async_logging: bool,
    /// Output stream
    pub writer: LogWriter,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("BRRTR_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("BRRTR_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            target_filter: env::var("BRRTR_LOG_TARGET_FILTER").ok(),
            include_location: env::var("BRRTR_LOG_INCLUDE_LOCATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            async_logging: env::var("BRRTR_LOG_ASYNC")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
            writer: LogWriter::parse(
                &env::var("BRRTR_LOG_WRITER").unwrap_or_else(|_| "stdout".to_string()),
            ),
        }
    }

    /// [`from_env`](Self::from_env) with output forced to stderr, leaving
    /// stdout to command results.
    pub fn for_cli() -> Self {
        Self {
            writer: LogWriter::Stderr,
            ..Self::from_env()
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));
        if let Some(target_filter) = &self.target_filter {
            for filter in target_filter.split(',') {
                let filter = filter.trim();
                if filter.is_empty() {
                    continue;
                }
                match filter.parse() {
                    Ok(directive) => env_filter = env_filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {filter}"),
                }
            }
        }
        env_filter
    }
}

/// Keeps the background writer alive; drop it at shutdown to flush.
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber described by `config`
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_config(config: &LogConfig) -> Result<LoggingGuard> {
    let (writer, worker) = match (config.async_logging, config.writer) {
        (true, LogWriter::Stdout) => {
            let (nb, guard) = tracing_appender::non_blocking(std::io::stdout());
            (BoxMakeWriter::new(nb), Some(guard))
        }
        (true, LogWriter::Stderr) => {
            let (nb, guard) = tracing_appender::non_blocking(std::io::stderr());
            (BoxMakeWriter::new(nb), Some(guard))
        }
        (false, LogWriter::Stdout) => (BoxMakeWriter::new(std::io::stdout), None),
        (false, LogWriter::Stderr) => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard { _worker: worker })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    }

    #[test]
    fn test_log_writer_parse() {
        assert_eq!(LogWriter::parse("stderr"), LogWriter::Stderr);
        assert_eq!(LogWriter::parse("STDERR"), LogWriter::Stderr);
        assert_eq!(LogWriter::parse("stdout"), LogWriter::Stdout);
        assert_eq!(LogWriter::parse("file"), LogWriter::Stdout);
    }

    #[test]
    fn test_cli_config_logs_to_stderr() {
        assert_eq!(LogConfig::for_cli().writer, LogWriter::Stderr);
    }

    #[test]
    fn test_unknown_level_defaults_to_info() {
        let config = LogConfig {
            log_level: "chatty".into(),
            ..LogConfig::from_env()
        };
        assert_eq!(config.level(), Level::INFO);

        let config = LogConfig {
            log_level: "DEBUG".into(),
            ..config
        };
        assert_eq!(config.level(), Level::DEBUG);
    }
}
