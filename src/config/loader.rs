// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Name of the configuration file looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = "monobuild.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// `monobuild.toml` at the repository root.
pub fn default_config_path(repository: &Path) -> PathBuf {
    repository.join(CONFIG_FILE_NAME)
}

/// Configuration for a run against `repository`.
///
/// - An explicit path must exist and be valid.
/// - Otherwise `monobuild.toml` at the repository root is used if present.
/// - Otherwise the built-in defaults apply.
pub fn load_for_repository(repository: &Path, explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        debug!(path = ?path, "loading explicit config");
        return load_and_validate(path);
    }

    let path = default_config_path(repository);
    if path.is_file() {
        debug!(path = ?path, "loading repository config");
        load_and_validate(&path)
    } else {
        debug!("no config file, using defaults");
        Ok(ConfigFile::default())
    }
}
