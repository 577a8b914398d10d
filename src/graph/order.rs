// src/graph/order.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{MonobuildError, Result};
use crate::graph::BuildGraph;
use crate::target::RepositoryTarget;

impl BuildGraph {
    /// Directories ordered so every dependency precedes its dependents; the
    /// target comes last.
    pub fn build_order(&self) -> Result<Vec<&RepositoryTarget>> {
        // Edge direction: dependency -> dependent.
        let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

        for dir in self.directories() {
            graph.add_node(dir.directory().key());
        }
        for dir in self.directories() {
            for parent in dir.parent_directories() {
                graph.add_edge(dir.directory().key(), parent.key(), ());
            }
        }

        let order = toposort(&graph, None).map_err(|cycle| MonobuildError::Cycle {
            path: vec![cycle.node_id().to_string()],
        })?;

        Ok(order
            .into_iter()
            .filter_map(|key| {
                self.directories()
                    .map(|d| d.directory())
                    .find(|d| d.key() == key)
            })
            .collect())
    }
}
