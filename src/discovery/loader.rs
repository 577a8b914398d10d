// src/discovery/loader.rs

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;

use globset::GlobMatcher;
use tracing::{debug, trace};

use crate::config::ConfigFile;
use crate::discovery::extractor::{DepsFileExtractor, DependencyExtractor, ProjectReferenceExtractor};
use crate::discovery::ignore::parse_ignore_file;
use crate::discovery::{DirectoryLoadResult, DirectoryLoader};
use crate::errors::{MonobuildError, Result};
use crate::fs::FileSystem;
use crate::glob::matcher;
use crate::target::{AbsoluteTarget, RepositoryTarget};

#[derive(Debug)]
struct RegisteredFormat {
    extractor: Box<dyn DependencyExtractor>,
    files: GlobMatcher,
}

/// Directory loader backed by a [`FileSystem`].
///
/// Each call runs on tokio's blocking pool; cloning is cheap.
#[derive(Debug, Clone)]
pub struct FsDirectoryLoader {
    fs: Arc<dyn FileSystem>,
    formats: Arc<Vec<RegisteredFormat>>,
    ignore_file: Arc<str>,
}

impl FsDirectoryLoader {
    /// Register `extractors` in order; `ignore_file` names the per-directory
    /// ignore declarations.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        extractors: Vec<Box<dyn DependencyExtractor>>,
        ignore_file: impl AsRef<str>,
    ) -> Result<Self> {
        let formats = extractors
            .into_iter()
            .map(|extractor| {
                let files = matcher::compile(extractor.search_pattern())?;
                Ok(RegisteredFormat { extractor, files })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fs,
            formats: Arc::new(formats),
            ignore_file: Arc::from(ignore_file.as_ref()),
        })
    }

    /// Project-reference extractors for each `[files].projects` pattern,
    /// then the deps-file extractor.
    pub fn from_config(fs: Arc<dyn FileSystem>, cfg: &ConfigFile) -> Result<Self> {
        let mut extractors: Vec<Box<dyn DependencyExtractor>> = Vec::new();
        for pattern in &cfg.files.projects {
            extractors.push(Box::new(ProjectReferenceExtractor::new(pattern.clone())?));
        }
        extractors.push(Box::new(DepsFileExtractor::new(
            cfg.files.deps.clone(),
            cfg.deps.prefixes,
        )));

        Self::new(fs, extractors, &cfg.files.ignore)
    }

    fn load_blocking(&self, dir: &Path, target: &RepositoryTarget) -> Result<DirectoryLoadResult> {
        if !self.fs.exists(dir) {
            return Err(MonobuildError::NotFound(format!(
                "the path {target} does not exist ({})",
                dir.display()
            )));
        }
        if !self.fs.is_dir(dir) {
            return Err(MonobuildError::NotFound(format!(
                "the path {target} is not a directory ({})",
                dir.display()
            )));
        }

        let mut entries = self.fs.read_dir(dir)?;
        entries.sort();

        let mut dependencies = Vec::new();
        for format in self.formats.iter() {
            for entry in &entries {
                let Some(name) = entry.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !format.files.is_match(name) || !self.fs.is_file(entry) {
                    continue;
                }

                let contents = self.fs.read_to_string(entry)?;
                let found = format.extractor.extract(&contents);
                trace!(file = ?entry, count = found.len(), "extracted dependencies");
                dependencies.extend(found);
            }
        }

        let ignore_path = dir.join(&*self.ignore_file);
        let ignore_globs = if self.fs.is_file(&ignore_path) {
            parse_ignore_file(&self.fs.read_to_string(&ignore_path)?)
        } else {
            Vec::new()
        };

        debug!(
            directory = %target,
            dependencies = dependencies.len(),
            ignores = ignore_globs.len(),
            "discovered build directory"
        );

        Ok(DirectoryLoadResult {
            ignore_globs,
            dependencies,
        })
    }
}

impl DirectoryLoader for FsDirectoryLoader {
    fn load<'a>(
        &'a self,
        target: &'a AbsoluteTarget,
    ) -> Pin<Box<dyn Future<Output = Result<DirectoryLoadResult>> + Send + 'a>> {
        let this = self.clone();
        let dir = target.absolute_path();
        let directory = target.directory().clone();

        Box::pin(async move {
            tokio::task::spawn_blocking(move || this.load_blocking(&dir, &directory))
                .await
                .map_err(anyhow::Error::from)?
        })
    }
}
