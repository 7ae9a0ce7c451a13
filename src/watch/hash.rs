use std::path::Path;

use tracing::trace;
use xxhash_rust::xxh3::xxh3_64;

use crate::errors::{KigoError, Result};
use crate::fs::FileSystem;
use crate::types::Fingerprint;

/// Compute the xxh3 64-bit fingerprint of file content.
#[inline]
pub fn hash_content(content: &[u8]) -> Fingerprint {
    xxh3_64(content)
}

/// Compute the fingerprint of a single file.
///
/// The whole file is read into memory; watched trees are expected to hold
/// source-sized files.
pub fn compute_file_hash(fs: &dyn FileSystem, path: &Path) -> Result<Fingerprint> {
    let contents = fs.read_bytes(path).map_err(|err| KigoError::Hash {
        path: path.display().to_string(),
        reason: format!("{err:#}"),
    })?;
    let hash = hash_content(&contents);
    trace!(path = %path.display(), hash = %format!("{hash:016x}"), "hashed file");
    Ok(hash)
}
