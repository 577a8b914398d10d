// src/discovery/ignore.rs

use crate::discovery::extractor::declaration_lines;
use crate::glob::Glob;

/// Parse an ignore file: one raw glob per line, same comment and blank-line
/// rules as the deps file.
pub fn parse_ignore_file(contents: &str) -> Vec<Glob> {
    declaration_lines(contents).map(Glob::new).collect()
}
