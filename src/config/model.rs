// src/config/model.rs

use serde::Deserialize;

use crate::types::PrefixMode;

/// Name of the per-directory ignore file.
pub const DEFAULT_IGNORE_FILE: &str = ".monobuild.ignore";
/// Name of the per-directory line-based dependency file.
pub const DEFAULT_DEPS_FILE: &str = ".monobuild.deps";
/// Project files scanned for `<ProjectReference>` entries.
pub const DEFAULT_PROJECT_PATTERNS: [&str; 2] = ["*.csproj", "*.fsproj"];

/// Configuration as read from `monobuild.toml`, before validation.
///
/// ```toml
/// [files]
/// ignore = ".monobuild.ignore"
/// deps = ".monobuild.deps"
/// projects = ["*.csproj", "*.fsproj"]
///
/// [deps]
/// prefixes = "literal"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub files: FilesSection,

    #[serde(default)]
    pub deps: DepsSection,
}

/// A validated configuration.
///
/// Obtained through `ConfigFile::try_from(RawConfigFile)` (see `validate.rs`)
/// or `ConfigFile::default()`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub files: FilesSection,
    pub deps: DepsSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(files: FilesSection, deps: DepsSection) -> Self {
        Self { files, deps }
    }

    /// File names that never count as triggering changes.
    pub fn reserved_file_names(&self) -> Vec<String> {
        vec![self.files.ignore.clone(), self.files.deps.clone()]
    }
}

/// `[files]` section: reserved and scanned file names.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesSection {
    /// Ignore-glob declarations, one per directory.
    #[serde(default = "default_ignore_file")]
    pub ignore: String,

    /// Line-based dependency declarations, one per directory.
    #[serde(default = "default_deps_file")]
    pub deps: String,

    /// File-name globs of project files carrying `<ProjectReference>`s.
    #[serde(default = "default_project_patterns")]
    pub projects: Vec<String>,
}

fn default_ignore_file() -> String {
    DEFAULT_IGNORE_FILE.to_string()
}

fn default_deps_file() -> String {
    DEFAULT_DEPS_FILE.to_string()
}

fn default_project_patterns() -> Vec<String> {
    DEFAULT_PROJECT_PATTERNS.iter().map(|s| s.to_string()).collect()
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            ignore: default_ignore_file(),
            deps: default_deps_file(),
            projects: default_project_patterns(),
        }
    }
}

/// `[deps]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepsSection {
    /// Treatment of `self:` / `parent:` prefixes in the deps file.
    #[serde(default)]
    pub prefixes: PrefixMode,
}
