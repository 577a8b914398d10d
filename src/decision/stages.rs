// src/decision/stages.rs

//! The four exclusion stages, in order.

use tracing::trace;

use crate::decision::{Change, ReservedFiles};
use crate::graph::BuildGraph;
use crate::target::RepositoryTarget;

/// A change some relative ignore could suppress, with its closest build
/// directory.
#[derive(Debug, Clone)]
pub struct Candidate<'g> {
    pub change: Change,
    pub closest: &'g RepositoryTarget,
}

/// Stage 1: drop reserved metadata files and files outside every build
/// directory.
pub fn scope(changes: Vec<Change>, graph: &BuildGraph, reserved: &ReservedFiles) -> Vec<Change> {
    changes
        .into_iter()
        .filter(|c| {
            if reserved.is_reserved(&c.canonical) {
                trace!(file = %c.path, "reserved metadata file");
                return false;
            }
            graph
                .directories()
                .any(|d| d.directory().contains_canonical(&c.canonical))
        })
        .collect()
}

/// Stage 2: drop files matched by a local ignore of any directory containing
/// them. Nothing later can bring them back.
pub fn local_exclusion(changes: Vec<Change>, graph: &BuildGraph) -> Vec<Change> {
    changes
        .into_iter()
        .filter(|c| {
            let excluded_by = graph
                .directories()
                .find(|d| d.excludes_locally(&c.canonical));
            if let Some(dir) = excluded_by {
                trace!(file = %c.path, directory = %dir.directory(), "locally ignored");
            }
            excluded_by.is_none()
        })
        .collect()
}

/// Stage 3: only relative ignores anchored at a file's closest build
/// directory may exclude it.
///
/// Returns the files no such ignore matches (live) and the rest as
/// candidates for stage 4.
pub fn closest_dependency<'g>(
    changes: Vec<Change>,
    graph: &'g BuildGraph,
) -> (Vec<Change>, Vec<Candidate<'g>>) {
    let mut live = Vec::new();
    let mut candidates = Vec::new();

    for change in changes {
        let Some(closest) = graph.closest_containing(&change.canonical) else {
            live.push(change);
            continue;
        };
        let closest = closest.directory();

        let ignorable = graph
            .directories()
            .filter(|d| d.directory() != closest)
            .any(|d| d.excludes_relative(&change.canonical, closest));

        if ignorable {
            candidates.push(Candidate { change, closest });
        } else {
            live.push(change);
        }
    }

    (live, candidates)
}

/// Stage 4: a candidate is dropped only if, for every build directory
/// containing it, each immediate parent of that directory ignores it with a
/// relative glob anchored there. Candidates with no such parent stay.
pub fn transitive_consensus(candidates: Vec<Candidate<'_>>, graph: &BuildGraph) -> Vec<Change> {
    candidates
        .into_iter()
        .filter(|candidate| !excluded_by_every_parent(&candidate.change, graph))
        .map(|candidate| candidate.change)
        .collect()
}

fn excluded_by_every_parent(change: &Change, graph: &BuildGraph) -> bool {
    let mut consulted = 0usize;

    let containing = graph
        .directories()
        .filter(|d| d.directory().contains_canonical(&change.canonical));
    for dir in containing {
        let anchor = dir.directory();
        for parent in dir.parent_directories().filter(|p| *p != anchor) {
            consulted += 1;
            let excluded = graph
                .get(parent)
                .is_some_and(|p| p.excludes_relative(&change.canonical, anchor));
            if !excluded {
                trace!(file = %change.path, directory = %anchor, parent = %parent, "parent keeps change");
                return false;
            }
        }
    }

    if consulted > 0 {
        trace!(file = %change.path, "ignored by every parent");
    }
    consulted > 0
}
