//! Logging setup.
//!
//! All console output goes to stderr: stdout carries the generated table and
//! must stay clean.
//!
//! # Environment Variables
//!
//! - `ERRNO_TABLE_LOG`: filter directive (default supplied by the caller)
//! - `ERRNO_TABLE_LOG_FORMAT`: `pretty` or `json`
//! - `ERRNO_TABLE_LOG_FILE`: also write JSON events to this file

use std::fs::OpenOptions;
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub const LOG_LEVEL_ENV: &str = "ERRNO_TABLE_LOG";
pub const LOG_FORMAT_ENV: &str = "ERRNO_TABLE_LOG_FORMAT";
pub const LOG_FILE_ENV: &str = "ERRNO_TABLE_LOG_FILE";

/// Errors that can occur while installing the subscriber.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Console log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse a format name. Anything other than `json` is pretty output.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `errno_table=debug`.
    pub level: String,
    pub format: LogFormat,
    /// Write events to stderr.
    pub stderr: bool,
    /// Optional JSON log file.
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// Read configuration from the environment, falling back to `default_level`.
    pub fn from_env(default_level: &str) -> Self {
        Self::from_lookup(default_level, |name| std::env::var(name).ok())
    }

    fn from_lookup(default_level: &str, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            level: non_empty(LOG_LEVEL_ENV).unwrap_or_else(|| default_level.to_string()),
            format: non_empty(LOG_FORMAT_ENV)
                .map(|v| LogFormat::from_name(&v))
                .unwrap_or_default(),
            stderr: false,
            file: non_empty(LOG_FILE_ENV).map(PathBuf::from),
        }
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = level.to_string();
        self
    }

    pub fn with_stderr(mut self) -> Self {
        self.stderr = true;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }
}

/// Keeps background log writers alive; dropping flushes them.
#[must_use = "dropping the guards stops file logging"]
#[derive(Debug, Default)]
pub struct LoggingGuards {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuards, LogError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|source| LogError::InvalidFilter {
        directive: config.level.clone(),
        source,
    })?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.stderr {
        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        match config.format {
            LogFormat::Pretty => layers.push(layer.boxed()),
            LogFormat::Json => layers.push(layer.json().boxed()),
        }
    }

    let mut guards = LoggingGuards::default();
    if let Some(path) = &config.file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::LogFile {
                path: path.clone(),
                source,
            })?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer)
                .boxed(),
        );
        guards._file = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guards)
}
