// src/discovery/extractor.rs

use std::fmt;

use regex::Regex;

use crate::discovery::DependencyLocation;
use crate::errors::Result;
use crate::target::path_utils::to_forward_slashes;
use crate::types::{DependencyRole, PrefixMode};

/// A supported dependency-declaration format.
pub trait DependencyExtractor: Send + Sync + fmt::Debug {
    /// File-name glob selecting the files this extractor reads.
    fn search_pattern(&self) -> &str;

    /// Dependency locations declared in `contents`.
    fn extract(&self, contents: &str) -> Vec<DependencyLocation>;
}

/// Reads `<ProjectReference Include="..." />` entries from MSBuild project
/// files.
#[derive(Debug, Clone)]
pub struct ProjectReferenceExtractor {
    search_pattern: String,
    reference: Regex,
}

impl ProjectReferenceExtractor {
    pub fn new(search_pattern: impl Into<String>) -> Result<Self> {
        let reference = Regex::new(r#"<ProjectReference\s+Include\s*=\s*"([^"]*)""#)
            .map_err(anyhow::Error::from)?;
        Ok(Self {
            search_pattern: search_pattern.into(),
            reference,
        })
    }
}

impl DependencyExtractor for ProjectReferenceExtractor {
    fn search_pattern(&self) -> &str {
        &self.search_pattern
    }

    fn extract(&self, contents: &str) -> Vec<DependencyLocation> {
        self.reference
            .captures_iter(contents)
            .filter_map(|c| c.get(1))
            .map(|m| DependencyLocation::new(to_forward_slashes(m.as_str())))
            .collect()
    }
}

/// Plain line list: one location per line, `#` comments and blank lines
/// dropped. Lines are not validated.
#[derive(Debug, Clone)]
pub struct DepsFileExtractor {
    file_name: String,
    prefixes: PrefixMode,
}

impl DepsFileExtractor {
    pub fn new(file_name: impl Into<String>, prefixes: PrefixMode) -> Self {
        Self {
            file_name: file_name.into(),
            prefixes,
        }
    }
}

impl DependencyExtractor for DepsFileExtractor {
    fn search_pattern(&self) -> &str {
        &self.file_name
    }

    fn extract(&self, contents: &str) -> Vec<DependencyLocation> {
        declaration_lines(contents)
            .map(|line| match self.prefixes {
                PrefixMode::Literal => DependencyLocation::new(line),
                PrefixMode::Recognise => {
                    let (role, rest) = DependencyRole::split_prefix(&line);
                    DependencyLocation::new(rest).with_role(role)
                }
            })
            .collect()
    }
}

/// Meaningful lines of a line-based declaration file.
///
/// Lines end at `\n` or `\r`; each is trimmed and converted to forward
/// slashes.
pub fn declaration_lines(contents: &str) -> impl Iterator<Item = String> + '_ {
    contents
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(to_forward_slashes)
}
