use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::{AppConfig, CONFIG_FILE_NAME, ConfigError};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
///
/// Environment overrides are applied on top of whatever the file contains.
/// Loading never creates the application directory.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = app_dirs::app_root_path()
        .map_err(map_app_dir_error)?
        .join(CONFIG_FILE_NAME);
    let mut config = load_from_path(&path)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

/// Load configuration from a specific path; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

/// Save configuration to a specific path, creating parent directories as needed.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

/// Write through a sibling temp file so a crash never leaves a partial config.
fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    use rand::TryRngCore;
    let write_error = |path: &Path, message: String| ConfigError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(message),
    };
    let dir = path
        .parent()
        .ok_or_else(|| write_error(path, "config path has no parent directory".into()))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(path, "config path has no file name".into()))?;

    let mut last_err = None;
    for _ in 0..5 {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng.try_fill_bytes(&mut bytes).map_err(|source| {
            write_error(path, format!("failed to generate temporary file suffix: {source}"))
        })?;
        let suffix: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        let tmp_path = dir.join(format!("{}.tmp-{}", file_name.to_string_lossy(), suffix));

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(source) => {
                return Err(ConfigError::Write {
                    path: tmp_path,
                    source,
                });
            }
        };

        if let Err(source) = file.write_all(data).and_then(|_| file.sync_all()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::Write {
                path: tmp_path,
                source,
            });
        }
        drop(file);
        if let Err(source) = std::fs::rename(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        return Ok(());
    }

    Err(write_error(
        path,
        format!(
            "failed to create temporary file for {}: {}",
            path.display(),
            last_err
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown error".to_string())
        ),
    ))
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
