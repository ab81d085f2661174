pub mod config;
pub mod errors;
pub mod fs;
pub mod models;
pub mod pipeline;
pub mod runner;

use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use crate::config::{Config, Overrides};
pub use crate::fs::{FileSystem, MemoryFileSystem, OsFileSystem};
pub use crate::models::{FiledNote, Note, ProcessReport};
pub use crate::pipeline::process;
pub use crate::runner::run;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Human-readable events go to stderr; a JSON copy goes to a daily-rolling
/// file under `log_dir`. `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing(log_dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(log_dir)
        .map_err(|error| AppError::Io(format!("create log dir {}: {}", log_dir.to_string_lossy(), error)))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "chrononote.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
        .try_init()
        .map_err(|error| AppError::Internal(error.to_string()))
}
