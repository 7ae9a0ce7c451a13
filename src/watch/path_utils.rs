// src/watch/path_utils.rs

//! Utility functions for path handling in the detector.

use std::path::{Component, Path};

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if `path` does not live under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(rel.to_string_lossy().replace('\\', "/"))
}

/// The path as reported to commands and used as the hash table key.
///
/// Mirrors a cleaned `root/rel` join: a root of `.` (or an empty root)
/// yields just `rel`.
pub fn display_path(root: &Path, rel: &str) -> String {
    let is_cwd = root.as_os_str().is_empty()
        || root.components().all(|c| matches!(c, Component::CurDir));
    if is_cwd {
        return rel.to_string();
    }
    let root = root.to_string_lossy().replace('\\', "/");
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        // Filesystem root.
        return format!("/{rel}");
    }
    format!("{root}/{rel}")
}
