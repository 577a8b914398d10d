// src/discovery/mod.rs

//! Per-directory discovery of declared dependencies and ignore globs.
//!
//! The graph loader only sees the [`DirectoryLoader`] trait. The production
//! implementation, [`FsDirectoryLoader`], reads a directory through the
//! [`FileSystem`](crate::fs::FileSystem) abstraction and hands each
//! declaration file to the registered [`DependencyExtractor`]s.
//!
//! - [`extractor`]: project-reference and deps-file formats.
//! - [`ignore`]: ignore-file parsing.
//! - [`loader`]: the filesystem-backed directory loader.

pub mod extractor;
pub mod ignore;
pub mod loader;

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::glob::Glob;
use crate::target::AbsoluteTarget;
use crate::types::DependencyRole;

pub use extractor::{DepsFileExtractor, DependencyExtractor, ProjectReferenceExtractor};
pub use ignore::parse_ignore_file;
pub use loader::FsDirectoryLoader;

/// A dependency as written in a declaration file, relative to the
/// declaring directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyLocation {
    path: String,
    role: DependencyRole,
}

impl DependencyLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            role: DependencyRole::default(),
        }
    }

    pub fn with_role(mut self, role: DependencyRole) -> Self {
        self.role = role;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn role(&self) -> DependencyRole {
        self.role
    }
}

impl From<&str> for DependencyLocation {
    fn from(value: &str) -> Self {
        DependencyLocation::new(value)
    }
}

/// What a single directory declares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryLoadResult {
    pub ignore_globs: Vec<Glob>,
    pub dependencies: Vec<DependencyLocation>,
}

/// Trait abstracting how a build directory's declarations are read.
///
/// Production code uses [`FsDirectoryLoader`]; tests can provide their own
/// implementation that serves canned results.
pub trait DirectoryLoader: Send + Sync {
    /// Read the declarations of `target`.
    ///
    /// Fails with [`NotFound`](crate::errors::MonobuildError::NotFound) if the
    /// directory does not exist.
    fn load<'a>(
        &'a self,
        target: &'a AbsoluteTarget,
    ) -> Pin<Box<dyn Future<Output = Result<DirectoryLoadResult>> + Send + 'a>>;
}
