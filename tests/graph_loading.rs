// tests/graph_loading.rs

mod common;
use crate::common::{init_tracing, with_timeout, ScriptedLoader};

use std::error::Error;

use monobuild::errors::MonobuildError;
use monobuild::graph::{load_graph, BuildGraph, Parent};
use monobuild::target::{AbsoluteTarget, RepositoryTarget};

type TestResult = Result<(), Box<dyn Error>>;

fn target(dir: &str) -> AbsoluteTarget {
    AbsoluteTarget::new(RepositoryTarget::new(dir), "/repo")
}

async fn load(loader: &ScriptedLoader, dir: &str) -> Result<BuildGraph, MonobuildError> {
    with_timeout(load_graph(loader, &target(dir))).await
}

fn parents_of(graph: &BuildGraph, dir: &str) -> Vec<String> {
    graph
        .get(&RepositoryTarget::new(dir))
        .map(|d| d.parents().iter().map(Parent::to_string).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn directory_without_dependencies_is_a_single_node() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new().with_dir("src/app", &[], &[]);

    let graph = load(&loader, "src/app").await?;

    assert_eq!(graph.len(), 1);
    assert_eq!(graph.target().key(), "src/app");
    assert_eq!(parents_of(&graph, "src/app"), vec!["TARGET"]);
    Ok(())
}

#[tokio::test]
async fn project_and_directory_locations_resolve_to_directories() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("src/app", &["../core/core.csproj", "../util/", "..\\shared\\shared.fsproj"], &[])
        .with_dir("src/core", &[], &[])
        .with_dir("src/util", &[], &[])
        .with_dir("src/shared", &[], &[]);

    let graph = load(&loader, "src/app").await?;

    assert_eq!(graph.len(), 4);
    for dep in ["src/core", "src/util", "src/shared"] {
        assert_eq!(parents_of(&graph, dep), vec!["src/app"], "{dep}");
    }
    Ok(())
}

#[tokio::test]
async fn repository_root_can_be_the_target() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("", &["src/lib/lib.csproj"], &[])
        .with_dir("src/lib", &[], &[]);

    let graph = load(&loader, "").await?;

    assert!(graph.target().is_root());
    assert_eq!(parents_of(&graph, "src/lib"), vec!["."]);
    Ok(())
}

#[tokio::test]
async fn diamond_is_loaded_once_with_both_parents() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("a", &["../b/", "../c/"], &[])
        .with_dir("b", &["../d/"], &[])
        .with_dir("c", &["../d/"], &[])
        .with_dir("d", &[], &[]);

    let graph = load(&loader, "a").await?;

    assert_eq!(graph.len(), 4);
    assert_eq!(parents_of(&graph, "d"), vec!["b", "c"]);
    assert_eq!(loader.loaded(), vec!["a", "b", "d", "c"]);
    Ok(())
}

#[tokio::test]
async fn repeated_declarations_of_one_dependency_collapse() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("a", &["../b/one.csproj", "../b/two.csproj", "../B/"], &[])
        .with_dir("b", &[], &[]);

    let graph = load(&loader, "a").await?;

    assert_eq!(graph.len(), 2);
    assert_eq!(parents_of(&graph, "b"), vec!["a"]);
    Ok(())
}

#[tokio::test]
async fn spellings_differing_in_case_share_one_node() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("a", &["../Lib/", "../b/"], &[])
        .with_dir("b", &["../lib/"], &[])
        .with_dir("lib", &[], &[]);

    let graph = load(&loader, "a").await?;

    assert_eq!(graph.len(), 3);
    let lib = graph
        .get(&RepositoryTarget::new("LIB"))
        .ok_or("lib missing")?;
    assert_eq!(lib.directory().path(), "Lib");
    assert_eq!(parents_of(&graph, "lib"), vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn cycle_through_the_live_path_is_an_error() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("a", &["../b/"], &[])
        .with_dir("b", &["../c/"], &[])
        .with_dir("c", &["../d/"], &[])
        .with_dir("d", &["../b/"], &[]);

    let err = load(&loader, "a").await.err().ok_or("expected a cycle")?;

    match err {
        MonobuildError::Cycle { path } => {
            assert_eq!(path, vec!["TARGET", "a", "b", "c", "d", "b"]);
        }
        other => panic!("expected cycle, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn self_dependency_is_a_cycle() {
    init_tracing();
    let loader = ScriptedLoader::new().with_dir("a", &["./"], &[]);

    let result = load(&loader, "a").await;

    assert!(matches!(result, Err(MonobuildError::Cycle { .. })));
}

#[tokio::test]
async fn missing_dependency_is_not_found() {
    init_tracing();
    let loader = ScriptedLoader::new().with_dir("a", &["../missing/"], &[]);

    let result = load(&loader, "a").await;

    assert!(matches!(result, Err(MonobuildError::NotFound(_))));
}

#[tokio::test]
async fn missing_target_is_not_found() {
    init_tracing();
    let loader = ScriptedLoader::new();

    let result = load(&loader, "nowhere").await;

    assert!(matches!(result, Err(MonobuildError::NotFound(_))));
}

#[tokio::test]
async fn dependency_escaping_the_repository_is_a_config_error() {
    init_tracing();
    let loader = ScriptedLoader::new().with_dir("a", &["../../outside/x.csproj"], &[]);

    let result = load(&loader, "a").await;

    assert!(matches!(result, Err(MonobuildError::ConfigError(_))));
}

#[tokio::test]
async fn relative_ignore_needs_a_declared_dependency() {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("src/a", &["../b/"], &["../c/**/*.md"])
        .with_dir("src/b", &[], &[]);

    let result = load(&loader, "src/a").await;

    assert!(matches!(result, Err(MonobuildError::ConfigError(_))));
}

#[tokio::test]
async fn ignore_globs_are_classified_against_dependencies() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("src/a", &["../b/b.csproj"], &["*.md", "../b/docs/**"])
        .with_dir("src/b", &[], &[]);

    let graph = load(&loader, "src/a").await?;
    let a = graph.get(&RepositoryTarget::new("src/a")).ok_or("a missing")?;

    let anchors: Vec<Option<&str>> = a
        .ignore_globs()
        .iter()
        .map(|g| g.target().map(RepositoryTarget::key))
        .collect();
    assert_eq!(anchors, vec![None, Some("src/b")]);
    assert_eq!(a.ignore_globs()[1].glob().pattern(), "src/b/docs/**");
    Ok(())
}

#[tokio::test]
async fn build_order_lists_ignore_globs_with_their_anchor() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("src/a", &["../b/b.csproj"], &["*.md", "../b/docs/**"])
        .with_dir("src/b", &[], &[]);

    let graph = load(&loader, "src/a").await?;
    let listing = monobuild::render_build_order(&graph)?;

    assert!(listing.starts_with("monobuild dry-run\n  target = src/a\n\nbuild order (2):\n"));
    assert!(listing.contains("  - src/b\n      parents: src/a\n"));
    assert!(listing.contains("  - src/a\n      parents: TARGET\n"));
    assert!(listing.contains("      ignore: *.md\n"));
    assert!(listing.contains("      ignore: src/b/docs/** (in src/b)\n"));
    Ok(())
}

#[tokio::test]
async fn build_order_lists_dependencies_first() -> TestResult {
    init_tracing();
    let loader = ScriptedLoader::new()
        .with_dir("a", &["../b/", "../c/"], &[])
        .with_dir("b", &["../d/"], &[])
        .with_dir("c", &["../d/"], &[])
        .with_dir("d", &[], &[]);

    let graph = load(&loader, "a").await?;
    let order: Vec<&str> = graph.build_order()?.into_iter().map(|d| d.key()).collect();

    let pos = |dir: &str| order.iter().position(|d| *d == dir);
    assert_eq!(order.len(), 4);
    assert_eq!(pos("d"), Some(0));
    assert_eq!(pos("a"), Some(3));

    let listing = monobuild::render_build_order(&graph)?;
    assert!(listing.contains("target = a"));
    assert!(listing.contains("  - d\n      parents: b, c\n"));
    Ok(())
}
