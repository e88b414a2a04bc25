//! Structured logging setup
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the host. [`init_logging_with_config`] is the one the `oarv` binary
//! uses, and hosts without their own setup can call it too.
//!
//! Environment variables read by [`LogConfig::from_env`]:
//!
//! - `OARV_LOG_LEVEL`: trace/debug/info/warn/error (default `info`)
//! - `OARV_LOG_FORMAT`: json/pretty (default `json`)
//! - `OARV_LOG_ASYNC`: write through a background thread (default `false`)
//! - `OARV_LOG_TARGET_FILTER`: extra comma-separated filter directives
//! - `OARV_LOG_INCLUDE_LOCATION`: add file:line to each event (default `false`)
//!
//! `RUST_LOG`, when set, takes precedence over `OARV_LOG_LEVEL`.
//! Output goes to stderr so it never mixes with command output on stdout.

use anyhow::{Context, Result};
use std::env;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for machines, pretty-print for people
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a `tracing-appender` background worker
    pub async_logging: bool,
    /// Extra filter directives (comma-separated)
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("OARV_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("OARV_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
            async_logging: env_flag("OARV_LOG_ASYNC", false),
            target_filter: env::var("OARV_LOG_TARGET_FILTER").ok(),
            include_location: env_flag("OARV_LOG_INCLUDE_LOCATION", false),
        }
    }

    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }

    #[must_use]
    pub fn default_prod() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }

    /// The level named by `log_level`, falling back to INFO.
    #[must_use]
    pub fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// Build the filter: `RUST_LOG` if set, else the level, plus target directives.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
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

fn fmt_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match config.format {
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
    }
}

/// Install the global subscriber described by `config`.
///
/// With `async_logging` the returned guard must be kept alive for as long as
/// events should be flushed; dropping it stops the background writer.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use openapi_request_validator::logging::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::from_env())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    if config.async_logging {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        registry
            .with(fmt_layer(config, non_blocking))
            .try_init()
            .context("Failed to initialize async logging")?;
        Ok(Some(guard))
    } else {
        registry
            .with(fmt_layer(config, std::io::stderr))
            .try_init()
            .context("Failed to initialize sync logging")?;
        Ok(None)
    }
}
