pub mod decoder;
pub mod path_resolver;
pub mod serializer;
pub mod splitter;
pub mod validator;

use crate::errors::AppResult;
use crate::fs::FileSystem;
use crate::models::{FiledNote, ProcessReport};
use std::path::Path;

/// Files every note in `buffer` under `archive_dir`.
///
/// Decoding and validation cover the whole buffer before the first write, so
/// a bad note means nothing is written. Write-phase failures are returned as
/// they happen; notes appended earlier in the run stay on disk.
pub fn process(buffer: &str, archive_dir: &Path, fs: &dyn FileSystem) -> AppResult<ProcessReport> {
    let blocks = splitter::split_blocks(buffer);
    let notes = decoder::decode_blocks(&blocks)?;
    validator::validate_all(&notes)?;

    let mut report = ProcessReport::default();
    for note in &notes {
        tracing::info!(date = %note.date, title = %note.title, "processing note");
        let path = path_resolver::archive_path(archive_dir, &note.date)?;

        if let Some(parent) = path.parent() {
            fs.ensure_dir(parent).map_err(|error| {
                tracing::error!(path = %path.to_string_lossy(), error = %error, "failed to create archive directory");
                error
            })?;
        }

        let rendered = serializer::render_note(note)?;
        fs.append(&path, &rendered).map_err(|error| {
            tracing::error!(path = %path.to_string_lossy(), error = %error, "failed to write note");
            error
        })?;
        tracing::info!(path = %path.to_string_lossy(), "wrote note");

        report.filed.push(FiledNote {
            title: note.title.clone(),
            date: note.date.clone(),
            path,
        });
    }

    Ok(report)
}
