//! Application directory helpers anchored to a single `.telepredict` folder.
//!
//! The helpers centralize where config and log files live across platforms,
//! defaulting to the OS config directory (e.g., `%APPDATA%` on Windows) and
//! allowing a `TELEPREDICT_CONFIG_HOME` override for tests or portable setups.

use std::{
    path::PathBuf,
    sync::{LazyLock, Mutex},
};

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the OS config root.
pub const APP_DIR_NAME: &str = ".telepredict";
/// Environment variable that relocates the config root.
pub const CONFIG_HOME_ENV: &str = "TELEPREDICT_CONFIG_HOME";

static CONFIG_BASE_OVERRIDE: LazyLock<Mutex<Option<PathBuf>>> = LazyLock::new(|| Mutex::new(None));

/// Errors that can occur while resolving or preparing application directories.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Return the root `.telepredict` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let path = app_root_path()?;
    create_dir(&path)?;
    Ok(path)
}

/// Resolve the root `.telepredict` directory without touching the filesystem.
pub fn app_root_path() -> Result<PathBuf, AppDirError> {
    let base = config_base_dir().ok_or(AppDirError::NoBaseDir)?;
    Ok(base.join(APP_DIR_NAME))
}

/// Return the logs directory inside the `.telepredict` root, creating it if needed.
pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    let path = app_root_dir()?.join("logs");
    create_dir(&path)?;
    Ok(path)
}

fn create_dir(path: &PathBuf) -> Result<(), AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })
}

fn config_base_dir() -> Option<PathBuf> {
    if let Some(path) = CONFIG_BASE_OVERRIDE
        .lock()
        .ok()
        .and_then(|guard| guard.clone())
    {
        return Some(path);
    }
    if let Ok(path) = std::env::var(CONFIG_HOME_ENV) {
        return Some(PathBuf::from(path));
    }
    BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf())
}

#[cfg(test)]
pub(crate) fn set_config_base_override(path: PathBuf) {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = Some(path);
}

#[cfg(test)]
pub(crate) fn clear_config_base_override() {
    let mut guard = CONFIG_BASE_OVERRIDE
        .lock()
        .expect("config base override mutex poisoned");
    *guard = None;
}

/// Serializes tests that swap the process-wide config root.
#[cfg(test)]
pub(crate) static TEST_OVERRIDE_LOCK: Mutex<()> = Mutex::new(());

/// Points the config root at a temporary directory until dropped.
#[cfg(test)]
pub(crate) struct OverrideGuard {
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
impl OverrideGuard {
    pub(crate) fn set(path: PathBuf) -> Self {
        let lock = TEST_OVERRIDE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        set_config_base_override(path);
        Self { _lock: lock }
    }
}

#[cfg(test)]
impl Drop for OverrideGuard {
    fn drop(&mut self) {
        clear_config_base_override();
    }
}
