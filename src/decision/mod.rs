// src/decision/mod.rs

//! Change decision engine.
//!
//! Given the changed files and a loaded [`BuildGraph`], decide whether the
//! graph's target must be rebuilt. Files pass through four fixed stages (see
//! [`stages`]); whatever survives all of them triggers the build.
//!
//! The engine holds only its reserved file names, so one instance can serve
//! any number of (changes, graph) pairs, from any thread.

pub mod stages;

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::config::model::{ConfigFile, DEFAULT_DEPS_FILE, DEFAULT_IGNORE_FILE};
use crate::graph::BuildGraph;
use crate::target::path_utils;

/// Verdict for a build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShouldBuild {
    No,
    /// Rebuild; these changed files are responsible.
    Yes(BTreeSet<String>),
}

impl ShouldBuild {
    pub fn is_required(&self) -> bool {
        matches!(self, ShouldBuild::Yes(_))
    }

    /// Triggering files, empty for `No`.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        let files = match self {
            ShouldBuild::No => None,
            ShouldBuild::Yes(files) => Some(files),
        };
        files.into_iter().flatten().map(String::as_str)
    }
}

impl fmt::Display for ShouldBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShouldBuild::No => f.write_str("<NO>"),
            ShouldBuild::Yes(_) => f.write_str("<YES>"),
        }
    }
}

/// Graph metadata file names that never trigger a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedFiles {
    names: BTreeSet<String>,
}

impl ReservedFiles {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| n.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.reserved_file_names())
    }

    /// True if the last segment of the canonical path is reserved.
    pub fn is_reserved(&self, canonical: &str) -> bool {
        self.names.contains(path_utils::file_name(canonical))
    }
}

impl Default for ReservedFiles {
    fn default() -> Self {
        Self::new([DEFAULT_IGNORE_FILE, DEFAULT_DEPS_FILE])
    }
}

/// A changed file as reported and in canonical (lower-case, `/`) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub path: String,
    pub canonical: String,
}

impl Change {
    pub fn new(path: impl AsRef<str>) -> Self {
        let path = path_utils::to_forward_slashes(path.as_ref().trim());
        let canonical = path.to_lowercase();
        Self { path, canonical }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    reserved: ReservedFiles,
}

impl DecisionEngine {
    pub fn new(reserved: ReservedFiles) -> Self {
        Self { reserved }
    }

    pub fn reserved(&self) -> &ReservedFiles {
        &self.reserved
    }

    /// Run the four stages over `changes`.
    pub fn decide<I, S>(&self, changes: I, graph: &BuildGraph) -> ShouldBuild
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let changes: Vec<Change> = changes.into_iter().map(Change::new).collect();
        debug!(changes = changes.len(), directories = graph.len(), "deciding build");

        let scoped = stages::scope(changes, graph, &self.reserved);
        debug!(remaining = scoped.len(), "stage 1: scoped to build directories");
        if scoped.is_empty() {
            return ShouldBuild::No;
        }

        let local = stages::local_exclusion(scoped, graph);
        debug!(remaining = local.len(), "stage 2: local ignores applied");
        if local.is_empty() {
            return ShouldBuild::No;
        }

        let (mut live, candidates) = stages::closest_dependency(local, graph);
        debug!(
            live = live.len(),
            candidates = candidates.len(),
            "stage 3: closest-dependency ignores applied"
        );

        live.extend(stages::transitive_consensus(candidates, graph));
        debug!(remaining = live.len(), "stage 4: parent consensus applied");

        if live.is_empty() {
            ShouldBuild::No
        } else {
            ShouldBuild::Yes(live.into_iter().map(|c| c.path).collect())
        }
    }
}
