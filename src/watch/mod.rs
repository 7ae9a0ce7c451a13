// src/watch/mod.rs

//! Poll-based change detection.
//!
//! This module is responsible for:
//! - Compiling include / exclude patterns into matchers.
//! - Fingerprinting file contents.
//! - Walking the watch root and diffing fingerprints against the detector's
//!   in-memory hash table.
//!
//! It does **not** run commands; it only turns a directory tree into the
//! list of paths that changed since the previous walk.

pub mod detector;
pub mod hash;
pub mod path_utils;
pub mod patterns;

pub use detector::{ChangeDetector, HashTable};
pub use hash::{compute_file_hash, hash_content};
pub use patterns::{any_matches, compile, is_watched, Pattern, PatternSet};
