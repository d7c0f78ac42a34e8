//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! # Log Levels
//!
//! - `error`: fatal errors
//! - `warn`: recoverable decoding issues (duplicate fields, truncated values)
//! - `info`: files read and written, check summaries
//! - `debug`: per-section decoding details
//! - `trace`: everything else

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Crates whose events pass the configured level.
const LOG_TARGETS: [&str; 6] = [
    "adif_adi",
    "adif_adx",
    "adif_cli",
    "adif_common",
    "adif_model",
    "adif_standards",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    /// Filter directive for the configured level, e.g. `warn,adif_adi=warn,...`.
    #[must_use]
    pub fn filter_directive(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        let mut directive = level.clone();
        for target in LOG_TARGETS {
            directive.push_str(&format!(",{target}={level}"));
        }
        directive
    }

    fn env_filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.filter_directive());
        if self.use_env_filter {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
        } else {
            fallback()
        }
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let writer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(io::stderr),
    };

    let registry = tracing_subscriber::registry().with(config.env_filter());
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer).with_target(false))
            .init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false),
            )
            .init(),
    }
    Ok(())
}
