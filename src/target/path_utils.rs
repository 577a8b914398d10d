// src/target/path_utils.rs

//! Utility functions for repository-relative path handling.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// This is intentionally robust:
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again.
/// - Only if both attempts fail do we give up.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_forward_slashes(&rel.to_string_lossy()));
    }

    // Different absolute prefixes may name the same directory (symlinks,
    // /private/var on macOS, ...).
    if let (Ok(root_canon), Ok(path_canon)) = (root.canonicalize(), path.canonicalize()) {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(to_forward_slashes(&rel.to_string_lossy()));
        }
    }

    None
}

pub fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Join a repository-relative directory and a relative path.
///
/// The repository root is the empty string.
pub fn join(base: &str, rel: &str) -> String {
    if base.is_empty() {
        rel.to_string()
    } else {
        format!("{base}/{rel}")
    }
}

/// Lexically resolve `.` and `..` segments of a forward-slash path.
///
/// Empty segments are dropped; a trailing slash is preserved. Returns `None`
/// when the path climbs above its starting point.
pub fn normalize(path: &str) -> Option<String> {
    let trailing = path.ends_with('/');
    let mut out: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop()?;
            }
            s => out.push(s),
        }
    }

    let mut joined = out.join("/");
    if trailing && !joined.is_empty() {
        joined.push('/');
    }
    Some(joined)
}

/// Segment-aware prefix test on canonical (lower-case) paths.
///
/// The empty directory (repository root) contains every path.
pub fn is_within(dir: &str, path: &str) -> bool {
    dir.is_empty()
        || path == dir
        || (path.len() > dir.len() && path.starts_with(dir) && path.as_bytes()[dir.len()] == b'/')
}

/// The part of `path` below `dir`, if `dir` contains it.
pub fn strip_dir<'a>(dir: &str, path: &'a str) -> Option<&'a str> {
    if dir.is_empty() {
        return Some(path);
    }
    if !is_within(dir, path) {
        return None;
    }
    Some(path[dir.len()..].trim_start_matches('/'))
}

/// Last segment of a forward-slash path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
