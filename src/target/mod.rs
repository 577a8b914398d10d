// src/target/mod.rs

//! Repository-relative directory identifiers.
//!
//! A [`RepositoryTarget`] names a build directory relative to the repository
//! root. It keeps the spelling it was declared with (needed to reach the
//! directory on a case-sensitive filesystem) next to a lower-case key used
//! for identity, so two spellings of one physical directory collapse into a
//! single graph node.

pub mod path_utils;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::errors::{MonobuildError, Result};

#[derive(Debug, Clone)]
pub struct RepositoryTarget {
    path: String,
    key: String,
}

impl RepositoryTarget {
    /// Build a target from a repository-relative directory.
    ///
    /// Backslashes become forward slashes; `.` segments, empty segments and
    /// trailing slashes are dropped.
    pub fn new(directory: impl AsRef<str>) -> Self {
        let cleaned = path_utils::to_forward_slashes(directory.as_ref().trim());
        let path = cleaned
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");
        let key = path.to_lowercase();
        Self { path, key }
    }

    /// The repository root itself.
    pub fn root() -> Self {
        Self::new("")
    }

    /// Resolve a user supplied directory (absolute, or relative to the
    /// repository) into a target.
    pub fn from_path(repository: &Path, directory: &Path) -> Result<Self> {
        let rel = if directory.is_absolute() {
            path_utils::relative_str(repository, directory).ok_or_else(|| {
                MonobuildError::ConfigError(format!(
                    "target {} is not inside repository {}",
                    directory.display(),
                    repository.display()
                ))
            })?
        } else {
            path_utils::to_forward_slashes(&directory.to_string_lossy())
        };

        let normalized = path_utils::normalize(&rel).ok_or_else(|| {
            MonobuildError::ConfigError(format!(
                "target {} escapes the repository root",
                directory.display()
            ))
        })?;
        Ok(Self::new(normalized))
    }

    /// Directory as declared (forward slashes, original case).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Canonical lower-case identity.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_root(&self) -> bool {
        self.key.is_empty()
    }

    /// Case-insensitive, segment-aware containment of a repository file path.
    pub fn contains(&self, file: &str) -> bool {
        self.contains_canonical(&path_utils::to_forward_slashes(file).to_lowercase())
    }

    /// Like [`contains`](Self::contains) for a path already in canonical form.
    pub fn contains_canonical(&self, canonical: &str) -> bool {
        path_utils::is_within(&self.key, canonical)
    }

    /// Path of a canonical file path relative to this directory.
    pub fn relative_canonical<'a>(&self, canonical: &'a str) -> Option<&'a str> {
        path_utils::strip_dir(&self.key, canonical)
    }

    /// Resolve a dependency location declared inside this directory.
    ///
    /// A location names a file (`../core/core.csproj`) or, with a trailing
    /// slash, a directory (`../core/`); the directory part is the dependency.
    pub fn resolve(&self, location: &str) -> Result<RepositoryTarget> {
        let location = path_utils::to_forward_slashes(location.trim());
        let joined = path_utils::join(&self.path, &location);
        let dir_part = match joined.rfind('/') {
            Some(idx) => &joined[..idx],
            None => "",
        };

        let normalized = path_utils::normalize(dir_part).ok_or_else(|| {
            MonobuildError::ConfigError(format!(
                "dependency '{location}' declared in '{self}' escapes the repository root"
            ))
        })?;
        Ok(RepositoryTarget::new(normalized))
    }
}

impl PartialEq for RepositoryTarget {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RepositoryTarget {}

impl Hash for RepositoryTarget {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for RepositoryTarget {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RepositoryTarget {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl fmt::Display for RepositoryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.path)
        }
    }
}

impl From<&str> for RepositoryTarget {
    fn from(value: &str) -> Self {
        RepositoryTarget::new(value)
    }
}

/// A [`RepositoryTarget`] anchored at an absolute repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbsoluteTarget {
    directory: RepositoryTarget,
    repository: PathBuf,
}

impl AbsoluteTarget {
    pub fn new(directory: RepositoryTarget, repository: impl Into<PathBuf>) -> Self {
        Self {
            directory,
            repository: repository.into(),
        }
    }

    pub fn directory(&self) -> &RepositoryTarget {
        &self.directory
    }

    pub fn repository(&self) -> &Path {
        &self.repository
    }

    /// Same repository, different directory.
    pub fn with_directory(&self, directory: RepositoryTarget) -> Self {
        Self {
            directory,
            repository: self.repository.clone(),
        }
    }

    /// The path to hand to the filesystem to reach this directory.
    pub fn absolute_path(&self) -> PathBuf {
        if self.directory.is_root() {
            self.repository.clone()
        } else {
            self.repository.join(self.directory.path())
        }
    }
}
