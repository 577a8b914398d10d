// src/glob/matcher.rs

//! Compilation of raw patterns into `globset` matchers.
//!
//! All matchers are case-insensitive and treat `/` as a literal separator,
//! so `*` stays within one path segment and only `**` crosses segments.

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

use crate::errors::{MonobuildError, Result};

fn builder(pattern: &str) -> Result<globset::Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(true)
        .build()
        .map_err(|e| MonobuildError::ConfigError(format!("invalid glob pattern '{pattern}': {e}")))
}

/// Compile a single pattern.
pub fn compile(pattern: &str) -> Result<GlobMatcher> {
    Ok(builder(pattern)?.compile_matcher())
}

/// Build a GlobSet from simple string patterns.
pub fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut set = GlobSetBuilder::new();
    for pat in patterns {
        set.add(builder(pat.as_ref())?);
    }
    set.build()
        .map_err(|e| MonobuildError::ConfigError(format!("building glob set: {e}")))
}

/// True if the segment contains glob metacharacters.
pub fn is_glob_segment(segment: &str) -> bool {
    segment.contains(['*', '?', '[', ']', '{', '}'])
}
