use crate::errors::{AppError, AppResult};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub trait FileSystem {
    /// Returns `AppError::NotFound` when the path does not exist.
    fn read(&self, path: &Path) -> AppResult<Vec<u8>>;
    fn write(&self, path: &Path, data: &[u8]) -> AppResult<()>;
    /// Creates the file when missing.
    fn append(&self, path: &Path, data: &str) -> AppResult<()>;
    fn ensure_dir(&self, path: &Path) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        fs::read(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => AppError::NotFound(path.to_string_lossy().to_string()),
            _ => AppError::Io(format!("read {}: {}", path.to_string_lossy(), error)),
        })
    }

    fn write(&self, path: &Path, data: &[u8]) -> AppResult<()> {
        fs::write(path, data).map_err(|error| AppError::Io(format!("write {}: {}", path.to_string_lossy(), error)))
    }

    fn append(&self, path: &Path, data: &str) -> AppResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|error| {
                tracing::warn!(path = %path.to_string_lossy(), error = %error, "failed to open file for append");
                AppError::Io(format!("open {}: {}", path.to_string_lossy(), error))
            })?;

        file.write_all(data.as_bytes()).map_err(|error| {
            tracing::warn!(path = %path.to_string_lossy(), error = %error, "failed to append to file");
            AppError::Io(format!("append {}: {}", path.to_string_lossy(), error))
        })
    }

    fn ensure_dir(&self, path: &Path) -> AppResult<()> {
        fs::create_dir_all(path)
            .map_err(|error| AppError::Io(format!("create dir {}: {}", path.to_string_lossy(), error)))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    appends: usize,
    fail_appends_after: Option<usize>,
}

/// In-memory `FileSystem` for tests. Writes and appends require the parent
/// directory to have been created, mirroring the OS behaviour.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<MemoryState>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, creating its parent directories.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        {
            let mut state = self.lock();
            if let Some(parent) = path.parent() {
                insert_dir_tree(&mut state.dirs, parent);
            }
            state.files.insert(path, contents.as_bytes().to_vec());
        }
        self
    }

    /// Every append after the first `count` successful ones fails.
    pub fn fail_appends_after(self, count: usize) -> Self {
        self.lock().fail_appends_after = Some(count);
        self
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock()
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).to_string())
    }

    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }

    pub fn has_dir(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> AppResult<Vec<u8>> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::NotFound(path.to_string_lossy().to_string()))
    }

    fn write(&self, path: &Path, data: &[u8]) -> AppResult<()> {
        let mut state = self.lock();
        require_parent(&state.dirs, path)?;
        state.files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn append(&self, path: &Path, data: &str) -> AppResult<()> {
        let mut state = self.lock();
        if let Some(limit) = state.fail_appends_after {
            if state.appends >= limit {
                return Err(AppError::Io(format!(
                    "append {}: injected failure",
                    path.to_string_lossy()
                )));
            }
        }
        require_parent(&state.dirs, path)?;
        state
            .files
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(data.as_bytes());
        state.appends += 1;
        Ok(())
    }

    fn ensure_dir(&self, path: &Path) -> AppResult<()> {
        insert_dir_tree(&mut self.lock().dirs, path);
        Ok(())
    }
}

fn insert_dir_tree(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            continue;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn require_parent(dirs: &BTreeSet<PathBuf>, path: &Path) -> AppResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    // Relative bare file names and the filesystem root always exist.
    if parent.as_os_str().is_empty() || parent.parent().is_none() || dirs.contains(parent) {
        return Ok(());
    }
    Err(AppError::Io(format!(
        "{}: parent directory does not exist",
        path.to_string_lossy()
    )))
}
