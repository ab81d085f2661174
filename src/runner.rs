use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::fs::FileSystem;
use crate::models::ProcessReport;
use crate::pipeline;

/// Files the buffer's notes into the archive and clears the buffer. Every
/// successful run clears it, including one that filed nothing; on any
/// failure it is left exactly as it was.
pub fn run(config: &Config, fs: &dyn FileSystem) -> AppResult<ProcessReport> {
    let bytes = fs.read(&config.buffer_file).map_err(|error| {
        tracing::error!(path = %config.buffer_file.to_string_lossy(), error = %error, "failed to read buffer file");
        error
    })?;
    let buffer = String::from_utf8(bytes).map_err(|error| AppError::Decode {
        index: 0,
        message: format!("buffer file is not valid UTF-8: {}", error),
    })?;

    let report = pipeline::process(&buffer, &config.notes_dir, fs).map_err(|error| {
        tracing::error!(error = %error, "failed to process notes; buffer left untouched");
        error
    })?;

    if report.is_empty() {
        tracing::info!("buffer held no notes");
    }

    fs.write(&config.buffer_file, b"").map_err(|error| {
        tracing::error!(path = %config.buffer_file.to_string_lossy(), error = %error, "notes filed but buffer could not be cleared");
        error
    })?;
    tracing::info!(notes = report.len(), "buffer file cleared");

    Ok(report)
}
