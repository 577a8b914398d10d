// src/graph/path.rs

use crate::errors::{MonobuildError, Result};
use crate::graph::{ParentChild, TARGET};

/// The chain of edges from the target down to the directory being loaded.
///
/// Only edges that were actually descended are on the path. A directory
/// that reappears on its own path is a cycle; a directory reached again via
/// a different route (a diamond) is not.
#[derive(Debug, Default)]
pub struct DependencyPath {
    edges: Vec<ParentChild>,
}

impl DependencyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Drop every edge deeper than `depth`.
    pub fn rewind(&mut self, depth: usize) {
        self.edges.truncate(depth);
    }

    /// Step down `edge`, failing if its child is already on the path.
    pub fn descend(&mut self, edge: ParentChild) -> Result<()> {
        if self.edges.iter().any(|e| e.child == edge.child) {
            let mut path = self.describe();
            path.push(edge.child.to_string());
            return Err(MonobuildError::Cycle { path });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// The current branch has no further dependencies.
    pub fn finish_branch(&mut self) {
        self.edges.pop();
    }

    /// `TARGET` followed by each directory on the path.
    pub fn describe(&self) -> Vec<String> {
        std::iter::once(TARGET.to_string())
            .chain(self.edges.iter().map(|e| e.child.to_string()))
            .collect()
    }
}
