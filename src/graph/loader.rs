// src/graph/loader.rs

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, trace};

use crate::discovery::DirectoryLoader;
use crate::errors::{MonobuildError, Result};
use crate::glob::IgnoreGlob;
use crate::graph::path::DependencyPath;
use crate::graph::{BuildDirectory, BuildGraph, Parent, ParentChild};
use crate::target::{AbsoluteTarget, RepositoryTarget};

/// Sibling edges discovered together, with the path depth of their parent.
#[derive(Debug)]
struct EdgeGroup {
    depth: usize,
    edges: VecDeque<ParentChild>,
}

/// Loads the dependency graph rooted at one target directory.
///
/// Traversal is depth-first over an explicit stack of edge groups, so chain
/// depth is bounded by memory rather than the call stack. All traversal state
/// belongs to this value and is consumed by [`load`](Self::load).
pub struct GraphLoader<'a> {
    loader: &'a dyn DirectoryLoader,
    root: AbsoluteTarget,
    pending: Vec<EdgeGroup>,
    path: DependencyPath,
    nodes: BTreeMap<RepositoryTarget, BuildDirectory>,
}

impl<'a> GraphLoader<'a> {
    pub fn new(loader: &'a dyn DirectoryLoader, target: AbsoluteTarget) -> Self {
        let seed = EdgeGroup {
            depth: 0,
            edges: VecDeque::from([ParentChild::new(
                Parent::Target,
                target.directory().clone(),
            )]),
        };

        Self {
            loader,
            root: target,
            pending: vec![seed],
            path: DependencyPath::new(),
            nodes: BTreeMap::new(),
        }
    }

    /// Walk every declared dependency and return the resolved graph.
    ///
    /// Discovery calls are awaited one at a time.
    pub async fn load(mut self) -> Result<BuildGraph> {
        while let Some(edge) = self.next_edge()? {
            if let Some(node) = self.nodes.get_mut(&edge.child) {
                trace!(child = %edge.child, parent = %edge.parent, "already loaded, adding parent");
                if !node.add_parent(edge.parent.clone()) {
                    return Err(MonobuildError::Cycle {
                        path: self.path.describe(),
                    });
                }
                continue;
            }

            self.load_directory(edge).await?;
        }

        debug!(
            target = %self.root.directory(),
            directories = self.nodes.len(),
            "dependency graph loaded"
        );
        Ok(BuildGraph::new(self.root.directory().clone(), self.nodes))
    }

    /// Pop the next edge, pushing its unvisited siblings back, and descend it.
    fn next_edge(&mut self) -> Result<Option<ParentChild>> {
        while let Some(mut group) = self.pending.pop() {
            let Some(edge) = group.edges.pop_front() else {
                continue;
            };
            let depth = group.depth;
            if !group.edges.is_empty() {
                self.pending.push(group);
            }

            self.path.rewind(depth);
            self.path.descend(edge.clone())?;
            return Ok(Some(edge));
        }
        Ok(None)
    }

    async fn load_directory(&mut self, edge: ParentChild) -> Result<()> {
        let absolute = self.root.with_directory(edge.child.clone());
        debug!(directory = %edge.child, parent = %edge.parent, "loading build directory");

        let declared = self.loader.load(&absolute).await?;

        let mut children: Vec<RepositoryTarget> = Vec::with_capacity(declared.dependencies.len());
        for location in &declared.dependencies {
            let dependency = edge.child.resolve(location.path())?;
            trace!(
                directory = %edge.child,
                location = location.path(),
                role = ?location.role(),
                dependency = %dependency,
                "resolved dependency"
            );
            if !children.contains(&dependency) {
                children.push(dependency);
            }
        }

        if children.is_empty() {
            self.path.finish_branch();
        } else {
            self.pending.push(EdgeGroup {
                depth: self.path.len(),
                edges: children.iter().map(|c| edge.make_child(c.clone())).collect(),
            });
        }

        let ignore_globs = declared
            .ignore_globs
            .into_iter()
            .map(|glob| IgnoreGlob::construct(glob, &edge.child, &children))
            .collect::<Result<Vec<_>>>()?;

        self.nodes.insert(
            edge.child.clone(),
            BuildDirectory::new(edge.child, ignore_globs, edge.parent),
        );
        Ok(())
    }
}

/// Load the graph for `target` with a fresh [`GraphLoader`].
pub async fn load_graph(loader: &dyn DirectoryLoader, target: &AbsoluteTarget) -> Result<BuildGraph> {
    GraphLoader::new(loader, target.clone()).load().await
}
