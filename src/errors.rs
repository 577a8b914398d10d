// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonobuildError {
    /// A malformed configuration: an ignore glob that points at no declared
    /// dependency, a dependency escaping the repository, a bad config file.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The dependency graph revisits a directory through the live path.
    #[error("Cycle detected in dependency graph: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },

    /// A declared dependency or the target directory is absent on disk.
    #[error("Not found: {0}")]
    NotFound(String),

    /// There is no repository at the given root.
    #[error("No repository exists at {0}")]
    SourceUnavailable(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Git error: {0}")]
    GitError(#[from] git2::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, MonobuildError>;
