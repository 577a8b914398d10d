// tests/is_required.rs

mod common;
use crate::common::builders::{graph, DirectoryBuilder as Dir};
use crate::common::{changes, init_tracing, triggers};

use monobuild::decision::{DecisionEngine, ReservedFiles, ShouldBuild};
use monobuild::target::RepositoryTarget;

fn decide(files: &[&str], dirs: impl IntoIterator<Item = Dir>) -> ShouldBuild {
    init_tracing();
    DecisionEngine::default().decide(&changes(files), &graph(dirs))
}

#[test]
fn code_change_in_target_requires_build() {
    let verdict = decide(&["src/builddir/code.cs"], [Dir::new("src/builddir")]);

    assert!(verdict.is_required());
    assert_eq!(triggers(&verdict), vec!["src/builddir/code.cs"]);
}

#[test]
fn locally_ignored_change_in_target_needs_no_build() {
    let verdict = decide(
        &["src/builddir/readme.md"],
        [Dir::new("src/builddir").ignore("*.md")],
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn dependency_change_ignored_by_relative_glob_needs_no_build() {
    let verdict = decide(
        &["src/dep/notes.md"],
        [
            Dir::new("src/builddir")
                .depends_on("src/dep")
                .ignore("../dep/**/*.md"),
            Dir::new("src/dep").parent("src/builddir"),
        ],
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn change_outside_every_build_directory_needs_no_build() {
    let verdict = decide(&["src/nonBuildDir/somefile.cs"], [Dir::new("src/builddir")]);

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn directory_name_prefix_is_not_containment() {
    let verdict = decide(&["src/builddir2/somefile.cs"], [Dir::new("src/builddir")]);

    assert_eq!(verdict, ShouldBuild::No);
    let dir = RepositoryTarget::new("src/builddir");
    assert!(!dir.contains("src/builddir2/somefile.cs"));
    assert!(dir.contains("SRC\\BuildDir\\somefile.cs"));
}

#[test]
fn empty_change_set_needs_no_build() {
    let verdict = decide(&[], [Dir::new("src/builddir")]);

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn build_required_when_not_every_file_is_ignored() {
    let verdict = decide(
        &["src/builddir/somefile.cs", "src/builddir/somefile.md"],
        [Dir::new("src/builddir").ignore("*.md")],
    );

    assert_eq!(triggers(&verdict), vec!["src/builddir/somefile.cs"]);
}

#[test]
fn change_anywhere_in_dependency_requires_build() {
    for (file, reason) in [
        ("src/dependency/somefile.cs", "file in main directory of dependency"),
        ("src/dependency/Subdirectory/somefile.cs", "file in sub-directory of dependency"),
    ] {
        let verdict = decide(
            &[file],
            [
                Dir::new("src/builddir").depends_on("src/dependency"),
                Dir::new("src/dependency").parent("src/builddir"),
            ],
        );

        assert!(verdict.is_required(), "{reason}");
    }
}

#[test]
fn dependency_local_ignore_applies_to_its_own_files() {
    let verdict = decide(
        &["src/dependency/somefile.md"],
        [
            Dir::new("src/builddir").depends_on("src/dependency"),
            Dir::new("src/dependency").parent("src/builddir").ignore("*.md"),
        ],
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn local_ignore_cannot_be_resurrected_by_ancestors() {
    // The parent declares nothing about *.md, the dependency ignores it locally.
    let verdict = decide(
        &["src/dependency/docs/guide.md"],
        [
            Dir::new("src/builddir").depends_on("src/dependency").ignore("*.cs"),
            Dir::new("src/dependency").parent("src/builddir").ignore("*.md"),
        ],
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn closer_independent_dependency_takes_precedence_over_relative_ignore() {
    let verdict = decide(
        &["src/dependency/API/somefile.md"],
        [
            Dir::new("src/builddir")
                .depends_on("src/dependency")
                .ignore("../dependency/**/*.md"),
            Dir::new("src/dependency").parent("src/builddir"),
            Dir::new("src/dependency/API").parent("src/builddir"),
        ],
    );

    assert!(verdict.is_required());
}

fn diamond(ignore_a: Option<&str>, ignore_b: Option<&str>) -> Vec<Dir> {
    let mut a = Dir::new("src/dependencyA")
        .parent("src/builddir")
        .depends_on("src/transitive");
    if let Some(glob) = ignore_a {
        a = a.ignore(glob);
    }
    let mut b = Dir::new("src/dependencyB")
        .parent("src/builddir")
        .depends_on("src/transitive");
    if let Some(glob) = ignore_b {
        b = b.ignore(glob);
    }

    vec![
        Dir::new("src/builddir")
            .depends_on("src/dependencyA")
            .depends_on("src/dependencyB"),
        a,
        b,
        Dir::new("src/transitive")
            .parent("src/dependencyA")
            .parent("src/dependencyB"),
    ]
}

#[test]
fn one_parent_ignoring_is_not_enough() {
    let verdict = decide(
        &["src/transitive/notImportantToA/somefile.cs"],
        diamond(Some("../transitive/notImportantToA/**/*.cs"), None),
    );

    assert!(verdict.is_required());
}

#[test]
fn parents_ignoring_different_directories_is_not_enough() {
    let verdict = decide(
        &["src/transitive/notImportantToA/somefile.cs"],
        diamond(
            Some("../transitive/notImportantToA/**/*.cs"),
            Some("../transitive/notImportantToB/**/*.cs"),
        ),
    );

    assert!(verdict.is_required());
}

#[test]
fn every_parent_ignoring_suppresses_the_change() {
    let verdict = decide(
        &["src/transitive/notImportant/somefile.cs"],
        diamond(
            Some("../transitive/notImportant/**/*.cs"),
            Some("../transitive/notImportant/**/*.cs"),
        ),
    );

    assert_eq!(verdict, ShouldBuild::No);
}

fn nested_dependencies(ignore_a: Option<&str>) -> Vec<Dir> {
    let mut a = Dir::new("src/a").parent("src/t").depends_on("lib");
    if let Some(glob) = ignore_a {
        a = a.ignore(glob);
    }

    vec![
        Dir::new("src/t").depends_on("src/a").depends_on("src/b"),
        a,
        Dir::new("src/b")
            .parent("src/t")
            .depends_on("lib/sub")
            .ignore("../../lib/sub/**/*.md"),
        Dir::new("lib").parent("src/a"),
        Dir::new("lib/sub").parent("src/b"),
    ]
}

#[test]
fn parent_of_outer_containing_directory_keeps_change() {
    // lib/sub is closest and its only parent ignores the file, but src/a
    // depends on lib, which also contains it.
    let verdict = decide(&["lib/sub/readme.md"], nested_dependencies(None));

    assert!(verdict.is_required());
    assert_eq!(triggers(&verdict), vec!["lib/sub/readme.md"]);
}

#[test]
fn parents_of_every_containing_directory_ignoring_suppresses_the_change() {
    let verdict = decide(
        &["lib/sub/readme.md"],
        nested_dependencies(Some("../../lib/sub/**/*.md")),
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn changed_path_case_does_not_matter() {
    let verdict = decide(&["SRC/BuildDir/Code.cs"], [Dir::new("src/builddir")]);

    assert_eq!(triggers(&verdict), vec!["SRC/BuildDir/Code.cs"]);
}

#[test]
fn reserved_metadata_files_never_trigger() {
    let verdict = decide(
        &[
            "src/builddir/.monobuild.ignore",
            "src/builddir/.monobuild.deps",
            "src/builddir/.MonoBuild.Deps",
        ],
        [Dir::new("src/builddir")],
    );

    assert_eq!(verdict, ShouldBuild::No);
}

#[test]
fn project_files_are_not_reserved() {
    let verdict = decide(&["src/builddir/app.csproj"], [Dir::new("src/builddir")]);

    assert!(verdict.is_required());
}

#[test]
fn custom_reserved_names_replace_defaults() {
    init_tracing();
    let engine = DecisionEngine::new(ReservedFiles::new(["build.deps"]));
    let graph = graph([Dir::new("src/builddir")]);

    assert_eq!(
        engine.decide(&changes(&["src/builddir/build.deps"]), &graph),
        ShouldBuild::No
    );
    assert!(
        engine
            .decide(&changes(&["src/builddir/.monobuild.deps"]), &graph)
            .is_required()
    );
}

#[test]
fn verdict_is_idempotent() {
    init_tracing();
    let engine = DecisionEngine::default();
    let graph = graph(diamond(Some("../transitive/notImportantToA/**/*.cs"), None));
    let files = changes(&[
        "src/transitive/notImportantToA/somefile.cs",
        "src/builddir/readme.md",
        "docs/unrelated.md",
    ]);

    let first = engine.decide(&files, &graph);
    let second = engine.decide(&files, &graph);

    assert_eq!(first, second);
}

#[test]
fn verdict_renders_as_yes_or_no() {
    let yes = decide(&["src/builddir/code.cs"], [Dir::new("src/builddir")]);
    let no = decide(&["elsewhere/code.cs"], [Dir::new("src/builddir")]);

    assert_eq!(yes.to_string(), "<YES>");
    assert_eq!(no.to_string(), "<NO>");
    assert_eq!(
        monobuild::render_verdict(&yes, true),
        "<YES>\nsrc/builddir/code.cs\n"
    );
    assert_eq!(monobuild::render_verdict(&yes, false), "<YES>\n");
    assert_eq!(monobuild::render_verdict(&no, true), "<NO>\n");
}
