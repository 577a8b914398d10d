// src/types.rs

use std::str::FromStr;
use serde::Deserialize;

/// How `self:` / `parent:` prefixes in a deps file are treated.
///
/// - `Literal`: lines are taken verbatim; a prefix is part of the path.
/// - `Recognise`: a leading `self:` or `parent:` is stripped and recorded as
///   the location's [`DependencyRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixMode {
    Literal,
    Recognise,
}

impl Default for PrefixMode {
    fn default() -> Self {
        PrefixMode::Literal
    }
}

impl FromStr for PrefixMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "literal" => Ok(PrefixMode::Literal),
            "recognise" | "recognize" => Ok(PrefixMode::Recognise),
            other => Err(format!(
                "invalid prefixes mode: {other} (expected \"literal\" or \"recognise\")"
            )),
        }
    }
}

/// Role a deps-file entry declared for itself.
///
/// Only meaningful when [`PrefixMode::Recognise`] is configured. The graph
/// loader records it in its logs; it does not change the graph shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyRole {
    /// `self:` or no prefix.
    SelfParent,
    /// `parent:` (the declaring directory acts as parent).
    Parent,
}

impl Default for DependencyRole {
    fn default() -> Self {
        DependencyRole::SelfParent
    }
}

impl DependencyRole {
    /// Split a recognised role prefix off `line`.
    pub fn split_prefix(line: &str) -> (DependencyRole, &str) {
        if let Some(rest) = line.strip_prefix("self:") {
            (DependencyRole::SelfParent, rest.trim_start())
        } else if let Some(rest) = line.strip_prefix("parent:") {
            (DependencyRole::Parent, rest.trim_start())
        } else {
            (DependencyRole::SelfParent, line)
        }
    }
}
