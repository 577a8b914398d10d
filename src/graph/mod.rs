// src/graph/mod.rs

//! Dependency graph of build directories.
//!
//! - [`loader`] walks declared dependencies from a target directory and
//!   produces a [`BuildGraph`].
//! - [`path`] holds the live traversal path used for cycle detection.
//! - [`order`] derives a dependencies-first listing of a loaded graph.

pub mod loader;
pub mod order;
pub mod path;

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::glob::IgnoreGlob;
use crate::target::{path_utils, RepositoryTarget};

pub use loader::{load_graph, GraphLoader};
pub use path::DependencyPath;

/// Display name of the sentinel parent of the target directory.
pub const TARGET: &str = "TARGET";

/// Parent of a build directory in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Parent {
    /// The directory is the one the build was requested for.
    Target,
    Directory(RepositoryTarget),
}

impl Parent {
    pub fn directory(&self) -> Option<&RepositoryTarget> {
        match self {
            Parent::Target => None,
            Parent::Directory(dir) => Some(dir),
        }
    }
}

impl From<RepositoryTarget> for Parent {
    fn from(value: RepositoryTarget) -> Self {
        Parent::Directory(value)
    }
}

impl fmt::Display for Parent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parent::Target => f.write_str(TARGET),
            Parent::Directory(dir) => dir.fmt(f),
        }
    }
}

/// An edge under traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentChild {
    pub parent: Parent,
    pub child: RepositoryTarget,
}

impl ParentChild {
    pub fn new(parent: Parent, child: RepositoryTarget) -> Self {
        Self { parent, child }
    }

    /// Edge from this edge's child down to `child`.
    pub fn make_child(&self, child: RepositoryTarget) -> ParentChild {
        ParentChild {
            parent: Parent::Directory(self.child.clone()),
            child,
        }
    }
}

/// A node of the graph: a directory, its ignore rules and its parents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDirectory {
    directory: RepositoryTarget,
    ignore_globs: Vec<IgnoreGlob>,
    parents: BTreeSet<Parent>,
}

impl BuildDirectory {
    pub fn new(directory: RepositoryTarget, ignore_globs: Vec<IgnoreGlob>, parent: Parent) -> Self {
        Self {
            directory,
            ignore_globs,
            parents: BTreeSet::from([parent]),
        }
    }

    pub fn directory(&self) -> &RepositoryTarget {
        &self.directory
    }

    pub fn ignore_globs(&self) -> &[IgnoreGlob] {
        &self.ignore_globs
    }

    pub fn parents(&self) -> &BTreeSet<Parent> {
        &self.parents
    }

    /// Record another parent. Returns `false` if it was already recorded,
    /// which the loader treats as a cycle.
    pub fn add_parent(&mut self, parent: Parent) -> bool {
        self.parents.insert(parent)
    }

    /// Parents that are real directories (the `TARGET` sentinel excluded).
    pub fn parent_directories(&self) -> impl Iterator<Item = &RepositoryTarget> {
        self.parents.iter().filter_map(Parent::directory)
    }

    /// True if any local glob of this directory excludes the canonical file.
    pub fn excludes_locally(&self, canonical_file: &str) -> bool {
        let Some(relative) = self.directory.relative_canonical(canonical_file) else {
            return false;
        };
        self.ignore_globs.iter().any(|g| g.excludes_local(relative))
    }

    /// True if one of this directory's relative globs targeting `closest`
    /// matches the canonical file.
    pub fn excludes_relative(&self, canonical_file: &str, closest: &RepositoryTarget) -> bool {
        self.ignore_globs
            .iter()
            .any(|g| g.excludes_relative(canonical_file, closest))
    }
}

/// Loaded graph: every build directory reachable from `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildGraph {
    target: RepositoryTarget,
    directories: BTreeMap<RepositoryTarget, BuildDirectory>,
}

impl BuildGraph {
    pub fn new(target: RepositoryTarget, directories: BTreeMap<RepositoryTarget, BuildDirectory>) -> Self {
        Self {
            target,
            directories,
        }
    }

    /// Build a graph from nodes; the target is the node parented by `TARGET`
    /// (the repository root if there is none).
    pub fn from_directories(directories: impl IntoIterator<Item = BuildDirectory>) -> Self {
        let directories: BTreeMap<_, _> = directories
            .into_iter()
            .map(|d| (d.directory.clone(), d))
            .collect();
        let target = directories
            .values()
            .find(|d| d.parents.contains(&Parent::Target))
            .map(|d| d.directory.clone())
            .unwrap_or_else(RepositoryTarget::root);
        Self::new(target, directories)
    }

    pub fn target(&self) -> &RepositoryTarget {
        &self.target
    }

    pub fn get(&self, directory: &RepositoryTarget) -> Option<&BuildDirectory> {
        self.directories.get(directory)
    }

    pub fn contains(&self, directory: &RepositoryTarget) -> bool {
        self.directories.contains_key(directory)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn directories(&self) -> btree_map::Values<'_, RepositoryTarget, BuildDirectory> {
        self.directories.values()
    }

    /// Most specific build directory containing the canonical file.
    pub fn closest_containing(&self, canonical_file: &str) -> Option<&BuildDirectory> {
        self.directories
            .values()
            .filter(|d| path_utils::is_within(d.directory.key(), canonical_file))
            .max_by_key(|d| d.directory.key().len())
    }
}
