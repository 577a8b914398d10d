// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{MonobuildError, Result};
use crate::glob::matcher::build_globset;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MonobuildError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.files, raw.deps))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_file_name("files.ignore", &cfg.files.ignore)?;
    validate_file_name("files.deps", &cfg.files.deps)?;
    validate_distinct_names(cfg)?;
    validate_project_patterns(cfg)?;
    Ok(())
}

fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MonobuildError::ConfigError(format!(
            "[{field}] must not be empty"
        )));
    }
    if name.contains(['/', '\\']) {
        return Err(MonobuildError::ConfigError(format!(
            "[{field}] must be a plain file name (got '{name}')"
        )));
    }
    Ok(())
}

fn validate_distinct_names(cfg: &RawConfigFile) -> Result<()> {
    if cfg.files.ignore.eq_ignore_ascii_case(&cfg.files.deps) {
        return Err(MonobuildError::ConfigError(format!(
            "[files].ignore and [files].deps must differ (both are '{}')",
            cfg.files.ignore
        )));
    }
    Ok(())
}

fn validate_project_patterns(cfg: &RawConfigFile) -> Result<()> {
    if let Some(empty) = cfg.files.projects.iter().find(|p| p.trim().is_empty()) {
        return Err(MonobuildError::ConfigError(format!(
            "[files].projects contains an empty pattern ('{empty}')"
        )));
    }
    build_globset(&cfg.files.projects)?;
    Ok(())
}
