// src/changes/mod.rs

//! Sources of changed repository files.
//!
//! The decision engine only sees a set of repo-relative paths; where they
//! come from is decided here.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use git2::{Commit, Diff, Repository, RepositoryOpenFlags};
use tracing::{debug, trace};

use crate::errors::{MonobuildError, Result};
use crate::target::path_utils;

/// Supplies the deduplicated set of changed repo-relative paths.
pub trait ChangeSource: Send + Sync {
    fn changes(&self) -> Result<BTreeSet<String>>;
}

/// Files touched by the commit at `HEAD`.
///
/// `HEAD` is diffed against each of its parents (a merge yields the union);
/// a root commit is diffed against the empty tree. Both sides of every delta
/// are reported, so a rename counts for its old and new location.
#[derive(Debug, Clone)]
pub struct GitChangeSource {
    root: PathBuf,
}

impl GitChangeSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn open(&self) -> Result<Repository> {
        Repository::open_ext(
            &self.root,
            RepositoryOpenFlags::NO_SEARCH,
            &[] as &[&std::ffi::OsStr],
        )
        .map_err(|_| MonobuildError::SourceUnavailable(self.root.display().to_string()))
    }
}

impl ChangeSource for GitChangeSource {
    fn changes(&self) -> Result<BTreeSet<String>> {
        let repo = self.open()?;
        let head = repo.head()?.peel_to_commit()?;
        let tree = head.tree()?;

        let mut changed = BTreeSet::new();
        if head.parent_count() == 0 {
            let diff = repo.diff_tree_to_tree(None, Some(&tree), None)?;
            collect_paths(&diff, &mut changed);
        } else {
            for parent in head.parents() {
                let diff = diff_against(&repo, &parent, &tree)?;
                collect_paths(&diff, &mut changed);
            }
        }

        debug!(commit = %head.id(), files = changed.len(), "collected changed files");
        Ok(changed)
    }
}

fn diff_against<'r>(repo: &'r Repository, parent: &Commit<'_>, tree: &git2::Tree<'_>) -> Result<Diff<'r>> {
    let parent_tree = parent.tree()?;
    trace!(parent = %parent.id(), "diffing against parent");
    Ok(repo.diff_tree_to_tree(Some(&parent_tree), Some(tree), None)?)
}

fn collect_paths(diff: &Diff<'_>, out: &mut BTreeSet<String>) {
    for delta in diff.deltas() {
        for file in [delta.old_file(), delta.new_file()] {
            if let Some(path) = file.path().and_then(Path::to_str) {
                out.insert(path_utils::to_forward_slashes(path));
            }
        }
    }
}

/// A fixed list of changes, e.g. from the command line.
#[derive(Debug, Clone, Default)]
pub struct StaticChangeSource {
    files: BTreeSet<String>,
}

impl StaticChangeSource {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            files: files
                .into_iter()
                .map(|f| path_utils::to_forward_slashes(f.as_ref().trim()))
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }
}

impl ChangeSource for StaticChangeSource {
    fn changes(&self) -> Result<BTreeSet<String>> {
        Ok(self.files.clone())
    }
}
