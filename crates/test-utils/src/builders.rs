#![allow(dead_code)]

use monobuild::config::{ConfigFile, RawConfigFile};
use monobuild::glob::{Glob, IgnoreGlob};
use monobuild::graph::{BuildDirectory, BuildGraph, Parent};
use monobuild::target::RepositoryTarget;
use monobuild::types::PrefixMode;

/// Builder for a single graph node, for decision tests that skip loading.
///
/// Ignore globs are classified against the declared dependencies exactly as
/// the loader would.
pub struct DirectoryBuilder {
    directory: RepositoryTarget,
    parents: Vec<Parent>,
    dependencies: Vec<RepositoryTarget>,
    ignores: Vec<String>,
}

impl DirectoryBuilder {
    /// A node; with no `parent(..)` call it becomes the target.
    pub fn new(directory: &str) -> Self {
        Self {
            directory: RepositoryTarget::new(directory),
            parents: vec![],
            dependencies: vec![],
            ignores: vec![],
        }
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parents
            .push(Parent::Directory(RepositoryTarget::new(parent)));
        self
    }

    pub fn depends_on(mut self, dependency: &str) -> Self {
        self.dependencies.push(RepositoryTarget::new(dependency));
        self
    }

    pub fn ignore(mut self, glob: &str) -> Self {
        self.ignores.push(glob.to_string());
        self
    }

    pub fn build(self) -> BuildDirectory {
        let globs = self
            .ignores
            .iter()
            .map(|g| {
                IgnoreGlob::construct(Glob::new(g), &self.directory, &self.dependencies)
                    .expect("invalid ignore glob in test builder")
            })
            .collect();

        let mut parents = self.parents.into_iter();
        let first = parents.next().unwrap_or(Parent::Target);
        let mut node = BuildDirectory::new(self.directory, globs, first);
        for parent in parents {
            node.add_parent(parent);
        }
        node
    }
}

/// Assemble a graph from node builders.
pub fn graph(directories: impl IntoIterator<Item = DirectoryBuilder>) -> BuildGraph {
    BuildGraph::from_directories(directories.into_iter().map(DirectoryBuilder::build))
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn ignore_file(mut self, name: &str) -> Self {
        self.config.files.ignore = name.to_string();
        self
    }

    pub fn deps_file(mut self, name: &str) -> Self {
        self.config.files.deps = name.to_string();
        self
    }

    pub fn projects(mut self, patterns: &[&str]) -> Self {
        self.config.files.projects = patterns.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn prefixes(mut self, mode: PrefixMode) -> Self {
        self.config.deps.prefixes = mode;
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
