//! Logging setup for the command line front end.
//!
//! Console output goes to stderr so that command output on stdout stays
//! machine readable. An optional rolling log file captures the same events
//! without ANSI colors.

use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::settings::Settings;

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Daily,
    Hourly,
    /// Single file, never rotated
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level used when `RUST_LOG` is unset
    pub level: Level,
    /// Log file, if file logging is enabled
    pub log_file: Option<PathBuf>,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            log_file: None,
            rotation: LogRotation::Never,
        }
    }
}

impl LoggingConfig {
    /// Build from settings. `debug` forces the debug level so that request
    /// traces are visible.
    pub fn from_settings(settings: &Settings) -> Self {
        let level = if settings.debug {
            Level::DEBUG
        } else {
            settings.log_level.parse().unwrap_or(Level::INFO)
        };

        Self {
            level,
            log_file: settings.log_file.clone(),
            rotation: LogRotation::Never,
        }
    }

    /// Split the log file into its directory and file name
    fn file_target(&self) -> Option<(PathBuf, String)> {
        let path = self.log_file.as_ref()?;
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Some((dir, file_name))
    }
}

/// Keeps the non-blocking file writer alive.
///
/// Buffered log output is flushed when this is dropped.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize the global subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);
    layers.push(Box::new(console_layer));

    let mut file_guard = None;
    if let Some((dir, file_name)) = config.file_target() {
        std::fs::create_dir_all(&dir)?;

        let appender = RollingFileAppender::new(config.rotation.into(), &dir, &file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        let file_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false)
            .with_filter(file_filter);
        layers.push(Box::new(file_layer));
    }

    Registry::default().with(layers).try_init()?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
