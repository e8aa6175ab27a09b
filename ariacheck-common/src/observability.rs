//! Shared observability helpers for the binary and integration tests.
//!
//! [`init_logging`] installs one global `tracing` subscriber that writes to a
//! daily rolling file and, optionally, mirrors events to `stderr` so progress
//! lines show up on the console. Call it once near process start and keep the
//! returned [`LoggingGuard`] alive until exit; dropping it flushes the file
//! sink. Later calls are no-ops whose guard only carries the resolved path.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Environment variable consulted when [`LogConfig::log_dir`] is unset.
pub const LOG_DIR_ENV: &str = "ARIACHECK_LOG_DIR";

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for defaults and file names).
    pub app_name: &'static str,
    /// Explicit log directory. If `None`, [`LOG_DIR_ENV`] is consulted and
    /// finally `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "ariacheck",
            log_dir: None,
            emit_stderr: true,
            format: LogFormat::Text,
            default_filter: "info",
        }
    }
}

/// Keeps the non-blocking file writer alive; buffered lines are flushed
/// when it is dropped.
#[must_use = "dropping the guard stops the file sink"]
#[derive(Debug)]
pub struct LoggingGuard {
    path: PathBuf,
    worker: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Log file for the day logging was initialised.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this guard owns the writer, i.e. came from the first call.
    pub fn owns_writer(&self) -> bool {
        self.worker.is_some()
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialise the global `tracing` subscriber.
pub fn init_logging(config: LogConfig) -> anyhow::Result<LoggingGuard> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(LoggingGuard {
            path: path.clone(),
            worker: None,
        });
    }

    let dir = log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let log_filename = format!("{}.log", config.app_name);
    // tracing-appender suffixes the daily file with the date.
    let today = Local::now().format("%Y-%m-%d").to_string();
    let full_path = dir.join(format!("{log_filename}.{today}"));

    let (writer, worker) = tracing_appender::non_blocking(rolling::daily(&dir, &log_filename));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    match config.format {
        LogFormat::Text => {
            layers.push(fmt::layer().with_writer(writer).with_ansi(false).boxed());
            if config.emit_stderr {
                layers.push(fmt::layer().with_writer(std::io::stderr).boxed());
            }
        }
        LogFormat::Json => {
            layers.push(fmt::layer().json().with_writer(writer).boxed());
            if config.emit_stderr {
                layers.push(fmt::layer().json().with_writer(std::io::stderr).boxed());
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    tracing::debug!(
        target: "ariacheck.log",
        path = %full_path.display(),
        format = ?config.format,
        "logging initialised"
    );
    Ok(LoggingGuard {
        path: full_path,
        worker: Some(worker),
    })
}

/// Explicit directory, then [`LOG_DIR_ENV`], then the per-user data dir.
fn log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let configured = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from));

    match (configured, home) {
        (Some(dir), Some(home)) => match dir.strip_prefix("~") {
            Ok(rest) => home.join(rest),
            Err(_) => dir,
        },
        (Some(dir), None) => dir,
        (None, Some(home)) => home.join(".local/share").join(app_name),
        (None, None) => Path::new(".").join(app_name),
    }
}
