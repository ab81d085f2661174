use crate::errors::{AppError, AppResult};
use crate::fs::FileSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "chrononote";
pub const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_BUFFER_FILE: &str = "note.md";
const DEFAULT_NOTES_DIR: &str = "notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub buffer_file: PathBuf,
    #[serde(default)]
    pub notes_dir: PathBuf,
    #[serde(skip)]
    pub config_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub buffer_file: Option<PathBuf>,
    pub notes_dir: Option<PathBuf>,
}

/// `~/.config/chrononote`
pub fn default_app_dir() -> AppResult<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| AppError::Config("unable to resolve home directory".to_string()))?;
    Ok(home.join(".config").join(APP_DIR_NAME))
}

impl Config {
    pub fn defaults(app_dir: &Path, config_file: &Path) -> Self {
        Self {
            buffer_file: app_dir.join(DEFAULT_BUFFER_FILE),
            notes_dir: app_dir.join(DEFAULT_NOTES_DIR),
            config_file: config_file.to_path_buf(),
        }
    }

    /// Reads `config_file`, writing the defaults there first when it does not
    /// exist. Keys missing from an existing file fall back to the defaults.
    pub fn load(config_file: &Path, app_dir: &Path, fs: &dyn FileSystem) -> AppResult<Self> {
        let defaults = Self::defaults(app_dir, config_file);

        let bytes = match fs.read(config_file) {
            Ok(bytes) => bytes,
            Err(AppError::NotFound(_)) => {
                tracing::info!(path = %config_file.to_string_lossy(), "config file missing; writing defaults");
                defaults.save(fs)?;
                return Ok(defaults);
            }
            Err(error) => return Err(error),
        };

        let mut config: Config = serde_json::from_slice(&bytes).map_err(|error| {
            AppError::Config(format!("failed to parse {}: {}", config_file.to_string_lossy(), error))
        })?;
        config.config_file = config_file.to_path_buf();
        if config.buffer_file.as_os_str().is_empty() {
            config.buffer_file = defaults.buffer_file;
        }
        if config.notes_dir.as_os_str().is_empty() {
            config.notes_dir = defaults.notes_dir;
        }
        Ok(config)
    }

    pub fn save(&self, fs: &dyn FileSystem) -> AppResult<()> {
        if let Some(parent) = self.config_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs.ensure_dir(parent)?;
            }
        }
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|error| AppError::Internal(format!("failed to serialize config: {}", error)))?;
        fs.write(&self.config_file, &bytes)
    }

    /// Returns whether anything changed.
    pub fn apply_overrides(&mut self, overrides: Overrides) -> bool {
        let mut updated = false;
        if let Some(buffer_file) = overrides.buffer_file {
            self.buffer_file = buffer_file;
            updated = true;
        }
        if let Some(notes_dir) = overrides.notes_dir {
            self.notes_dir = notes_dir;
            updated = true;
        }
        updated
    }

    /// Creates an empty buffer file when none exists yet.
    pub fn ensure_buffer(&self, fs: &dyn FileSystem) -> AppResult<()> {
        match fs.read(&self.buffer_file) {
            Ok(_) => Ok(()),
            Err(AppError::NotFound(_)) => {
                if let Some(parent) = self.buffer_file.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs.ensure_dir(parent)?;
                    }
                }
                tracing::info!(path = %self.buffer_file.to_string_lossy(), "creating empty buffer file");
                fs.write(&self.buffer_file, b"")
            }
            Err(error) => Err(error),
        }
    }
}

/// Loads the config, applies and persists command-line overrides, and makes
/// sure the buffer file exists.
pub fn initialize(
    config_file: &Path,
    app_dir: &Path,
    overrides: Overrides,
    fs: &dyn FileSystem,
) -> AppResult<Config> {
    let mut config = Config::load(config_file, app_dir, fs)?;
    if config.apply_overrides(overrides) {
        config.save(fs)?;
    }
    config.ensure_buffer(fs)?;

    tracing::info!(
        config_file = %config.config_file.to_string_lossy(),
        buffer_file = %config.buffer_file.to_string_lossy(),
        notes_dir = %config.notes_dir.to_string_lossy(),
        "configuration loaded"
    );
    Ok(config)
}
