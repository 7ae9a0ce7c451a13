use serde::{Deserialize, Serialize};

/// Content fingerprint of a single file.
pub type Fingerprint = u64;

/// Ordered list of paths that changed during one detection cycle.
///
/// Order follows the directory traversal order of the walk.
pub type ChangeSet = Vec<String>;

/// What the change detector does when a watched file cannot be read.
///
/// - `Abort`: stop the walk and surface the error (default). The watch loop
///   treats this as fatal.
/// - `Skip`: log a warning, leave the table untouched for that file (or the
///   whole unreadable subdirectory) and continue with the rest of the tree.
///   The watch root itself must always be listable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashErrorPolicy {
    #[default]
    Abort,
    Skip,
}
