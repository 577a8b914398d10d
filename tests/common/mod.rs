#![allow(dead_code)]

use std::collections::BTreeSet;

use monobuild::decision::ShouldBuild;

pub use monobuild_test_utils::builders;
pub use monobuild_test_utils::{init_tracing, with_timeout, ScriptedLoader};

/// Change set from literal paths.
pub fn changes(files: &[&str]) -> BTreeSet<String> {
    files.iter().map(|f| f.to_string()).collect()
}

/// Triggering files of a verdict, in order.
pub fn triggers(verdict: &ShouldBuild) -> Vec<String> {
    verdict.files().map(str::to_string).collect()
}
