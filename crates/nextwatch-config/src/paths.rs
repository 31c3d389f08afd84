use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base path override from `NEXTWATCH_BASE_PATH`, if set and non-empty
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os("NEXTWATCH_BASE_PATH")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// An explicit override wins, otherwise the platform config directory
fn resolve_base(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path.or_else(|| dirs::config_dir().map(|dir| dir.join("nextwatch")))
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = resolve_base(base_path_override())
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, data and logs in subdirectories
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Directory backing the persistent key/value store (one JSON file per key)
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("nextwatch.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        std::fs::create_dir_all(self.store_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // No config directory (e.g. no HOME) falls back to the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".nextwatch")))
    }
}
