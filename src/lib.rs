// src/lib.rs

pub mod changes;
pub mod cli;
pub mod config;
pub mod decision;
pub mod discovery;
pub mod errors;
pub mod fs;
pub mod glob;
pub mod graph;
pub mod logging;
pub mod target;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::changes::{ChangeSource, GitChangeSource, StaticChangeSource};
use crate::cli::CliArgs;
use crate::config::load_for_repository;
use crate::decision::{DecisionEngine, ReservedFiles, ShouldBuild};
use crate::discovery::{DirectoryLoader, FsDirectoryLoader};
use crate::fs::{FileSystem, RealFileSystem};
use crate::graph::{load_graph, BuildGraph};
use crate::target::{AbsoluteTarget, RepositoryTarget};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the change source (git, or `--changed`)
/// - graph loading from the target directory
/// - the decision engine and the printed verdict
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_for_repository(&args.repository, args.config.as_deref())?;

    let directory = RepositoryTarget::from_path(&args.repository, &args.target)?;
    let target = AbsoluteTarget::new(directory, &args.repository);

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let loader = FsDirectoryLoader::from_config(fs, &cfg)?;

    if args.dry_run {
        let graph = load_graph(&loader, &target).await?;
        print!("{}", render_build_order(&graph)?);
        debug!("dry-run complete (nothing decided)");
        return Ok(());
    }

    let source: Arc<dyn ChangeSource> = if args.changed.is_empty() {
        Arc::new(GitChangeSource::new(&args.repository))
    } else {
        Arc::new(StaticChangeSource::new(&args.changed))
    };
    let engine = DecisionEngine::new(ReservedFiles::from_config(&cfg));

    let verdict = evaluate(&loader, &target, source, &engine).await?;
    info!(target = %target.directory(), verdict = %verdict, "decided");

    print!("{}", render_verdict(&verdict, args.list_files));
    Ok(())
}

/// Collect the changes, load the graph for `target` and decide.
///
/// Changes are read first, on tokio's blocking pool, so a missing repository
/// is reported before any directory is touched.
pub async fn evaluate(
    loader: &dyn DirectoryLoader,
    target: &AbsoluteTarget,
    source: Arc<dyn ChangeSource>,
    engine: &DecisionEngine,
) -> errors::Result<ShouldBuild> {
    let changes = tokio::task::spawn_blocking(move || source.changes())
        .await
        .map_err(anyhow::Error::from)??;
    debug!(files = changes.len(), "changes collected");

    let graph = load_graph(loader, target).await?;
    Ok(engine.decide(&changes, &graph))
}

/// `<YES>` or `<NO>`, followed by the triggering files when requested.
pub fn render_verdict(verdict: &ShouldBuild, list_files: bool) -> String {
    let mut out = format!("{verdict}\n");
    if list_files {
        for file in verdict.files() {
            out.push_str(file);
            out.push('\n');
        }
    }
    out
}

/// Dry-run listing: directories dependencies-first, with their parents and
/// ignore globs.
pub fn render_build_order(graph: &BuildGraph) -> errors::Result<String> {
    let order = graph.build_order()?;

    let mut out = String::from("monobuild dry-run\n");
    out.push_str(&format!("  target = {}\n\n", graph.target()));
    out.push_str(&format!("build order ({}):\n", order.len()));

    for directory in order {
        out.push_str(&format!("  - {directory}\n"));
        let Some(node) = graph.get(directory) else {
            continue;
        };
        let parents: Vec<String> = node.parents().iter().map(|p| p.to_string()).collect();
        out.push_str(&format!("      parents: {}\n", parents.join(", ")));
        for glob in node.ignore_globs() {
            match glob.target() {
                Some(anchor) => out.push_str(&format!("      ignore: {} (in {anchor})\n", glob.glob())),
                None => out.push_str(&format!("      ignore: {}\n", glob.glob())),
            }
        }
    }

    Ok(out)
}
