// src/glob/mod.rs

//! Ignore-glob classification.
//!
//! Every line of a directory's ignore file becomes an [`IgnoreGlob`]:
//!
//! - [`IgnoreGlob::Local`] patterns are interpreted relative to the declaring
//!   directory and only ever match files below it.
//! - [`IgnoreGlob::Relative`] patterns escape upwards (`../dep/**/*.md`). They
//!   are rewritten to an absolute-from-root pattern and anchored at the most
//!   specific declared dependency that contains the location they name.

pub mod matcher;

use std::fmt;

use globset::GlobMatcher;
use tracing::trace;

use crate::errors::{MonobuildError, Result};
use crate::target::path_utils;
use crate::target::RepositoryTarget;

/// A raw ignore pattern, canonicalised to forward slashes and lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Glob(String);

impl Glob {
    pub fn new(pattern: impl AsRef<str>) -> Self {
        Glob(path_utils::to_forward_slashes(pattern.as_ref().trim()).to_lowercase())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// True if the pattern climbs out of its declaring directory.
    pub fn has_upward_escape(&self) -> bool {
        self.0
            .split('/')
            .find(|s| !s.is_empty() && *s != ".")
            .is_some_and(|s| s == "..")
    }
}

impl From<&str> for Glob {
    fn from(value: &str) -> Self {
        Glob::new(value)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone)]
pub enum IgnoreGlob {
    /// Matched against paths relative to the declaring directory.
    Local { glob: Glob, matcher: GlobMatcher },
    /// Matched against repository paths; anchored at `target`.
    Relative {
        glob: Glob,
        target: RepositoryTarget,
        matcher: GlobMatcher,
    },
}

impl fmt::Debug for IgnoreGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreGlob::Local { glob, .. } => f.debug_tuple("Local").field(&glob.0).finish(),
            IgnoreGlob::Relative { glob, target, .. } => f
                .debug_struct("Relative")
                .field("glob", &glob.0)
                .field("target", &target.key())
                .finish(),
        }
    }
}

impl PartialEq for IgnoreGlob {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (IgnoreGlob::Local { glob: a, .. }, IgnoreGlob::Local { glob: b, .. }) => a == b,
            (
                IgnoreGlob::Relative {
                    glob: a, target: ta, ..
                },
                IgnoreGlob::Relative {
                    glob: b, target: tb, ..
                },
            ) => a == b && ta == tb,
            _ => false,
        }
    }
}

impl Eq for IgnoreGlob {}

impl IgnoreGlob {
    /// Classify `glob` as declared by `owning` whose dependencies are
    /// `dependencies`.
    ///
    /// A local pattern starting with `/` is anchored at the declaring
    /// directory; otherwise it may match at any depth below it.
    pub fn construct(
        glob: Glob,
        owning: &RepositoryTarget,
        dependencies: &[RepositoryTarget],
    ) -> Result<IgnoreGlob> {
        if glob.has_upward_escape() {
            return Self::relative(glob, owning, dependencies);
        }

        let pattern = glob.pattern().trim_start_matches("./");
        let effective = match pattern.strip_prefix('/') {
            Some(anchored) => anchored.to_string(),
            None => format!("**/{pattern}"),
        };
        let matcher = matcher::compile(&effective)?;
        Ok(IgnoreGlob::Local { glob, matcher })
    }

    fn relative(
        glob: Glob,
        owning: &RepositoryTarget,
        dependencies: &[RepositoryTarget],
    ) -> Result<IgnoreGlob> {
        let joined = path_utils::join(owning.key(), glob.pattern());
        let resolved = path_utils::normalize(&joined).ok_or_else(|| {
            MonobuildError::ConfigError(format!(
                "ignore '{glob}' in '{owning}' escapes the repository root"
            ))
        })?;

        let location = resolved
            .split('/')
            .filter(|s| !s.is_empty())
            .take_while(|s| !matcher::is_glob_segment(s))
            .collect::<Vec<_>>()
            .join("/");

        let target = dependencies
            .iter()
            .filter(|dep| dep.contains_canonical(&location))
            .max_by_key(|dep| dep.key().len())
            .ok_or_else(|| {
                MonobuildError::ConfigError(format!(
                    "cannot create an ignore for '{glob}' in '{owning}': \
                     it is not a member of any declared dependency"
                ))
            })?
            .clone();

        trace!(%glob, %resolved, target = %target, "anchored relative ignore");

        let matcher = matcher::compile(&resolved)?;
        Ok(IgnoreGlob::Relative {
            glob: Glob(resolved),
            target,
            matcher,
        })
    }

    /// The pattern; for relative globs this is the rewritten root-anchored form.
    pub fn glob(&self) -> &Glob {
        match self {
            IgnoreGlob::Local { glob, .. } | IgnoreGlob::Relative { glob, .. } => glob,
        }
    }

    /// The dependency a relative glob is anchored at.
    pub fn target(&self) -> Option<&RepositoryTarget> {
        match self {
            IgnoreGlob::Local { .. } => None,
            IgnoreGlob::Relative { target, .. } => Some(target),
        }
    }

    /// Local exclusion of a path relative to the declaring directory.
    pub fn excludes_local(&self, relative: &str) -> bool {
        match self {
            IgnoreGlob::Local { matcher, .. } => matcher.is_match(relative),
            IgnoreGlob::Relative { .. } => false,
        }
    }

    /// Relative exclusion of a repository file whose closest build directory
    /// is `closest`.
    pub fn excludes_relative(&self, file: &str, closest: &RepositoryTarget) -> bool {
        match self {
            IgnoreGlob::Local { .. } => false,
            IgnoreGlob::Relative {
                target, matcher, ..
            } => target == closest && matcher.is_match(file),
        }
    }
}
