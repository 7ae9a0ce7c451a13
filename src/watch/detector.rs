// src/watch/detector.rs

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::WatchConfig;
use crate::errors::{KigoError, Result};
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::{ChangeSet, Fingerprint, HashErrorPolicy};
use crate::watch::hash::compute_file_hash;
use crate::watch::path_utils::{display_path, relative_str};
use crate::watch::patterns::is_watched;

/// Last observed fingerprint per watched path.
///
/// The table only ever grows: there is no removal API, so entries for files
/// that were deleted or later excluded stay around for the lifetime of the
/// process. A file that reappears with its old content is therefore not
/// reported again.
#[derive(Debug, Default)]
pub struct HashTable {
    entries: HashMap<String, Fingerprint>,
}

impl HashTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<Fingerprint> {
        self.entries.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `fingerprint` for `path` if it is new or different.
    ///
    /// Returns true when the entry was inserted or updated, i.e. when the
    /// path counts as changed.
    pub fn record(&mut self, path: &str, fingerprint: Fingerprint) -> bool {
        match self.entries.get_mut(path) {
            Some(prev) if *prev == fingerprint => false,
            Some(prev) => {
                *prev = fingerprint;
                true
            }
            None => {
                self.entries.insert(path.to_string(), fingerprint);
                true
            }
        }
    }
}

/// Polls a directory tree and reports which watched files changed content
/// since the previous call.
///
/// The detector is the single owner (and writer) of its [`HashTable`].
#[derive(Debug)]
pub struct ChangeDetector {
    fs: Arc<dyn FileSystem>,
    table: HashTable,
}

impl ChangeDetector {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            table: HashTable::new(),
        }
    }

    /// Detector over the real filesystem.
    pub fn real() -> Self {
        Self::new(Arc::new(RealFileSystem))
    }

    pub fn table(&self) -> &HashTable {
        &self.table
    }

    /// Walk `config.root` once and return the paths whose fingerprint is new
    /// or differs from the table, updating the table as it goes.
    ///
    /// Directory entries are visited in lexicographic order, depth first, so
    /// the returned order is stable for a given tree.
    ///
    /// With [`HashErrorPolicy::Abort`] the first unreadable file or directory
    /// stops the walk and the error is returned; entries already recorded
    /// during this walk stay recorded. With [`HashErrorPolicy::Skip`] an
    /// unreadable file or subdirectory is logged and left out, but a root
    /// that cannot be listed is still an error.
    pub fn detect(&mut self, config: &WatchConfig) -> Result<ChangeSet> {
        let mut changes = ChangeSet::new();
        self.walk_dir(config, &config.root, &mut changes)?;
        debug!(
            changed = changes.len(),
            tracked = self.table.len(),
            "detection walk finished"
        );
        Ok(changes)
    }

    fn walk_dir(
        &mut self,
        config: &WatchConfig,
        dir: &Path,
        changes: &mut ChangeSet,
    ) -> Result<()> {
        let mut entries = self.fs.read_dir(dir).map_err(|err| KigoError::Walk {
            path: dir.display().to_string(),
            reason: format!("{err:#}"),
        })?;
        entries.sort();

        for path in entries {
            if self.fs.is_dir(&path) {
                match self.walk_dir(config, &path, changes) {
                    Err(err @ KigoError::Walk { .. })
                        if config.on_hash_error == HashErrorPolicy::Skip =>
                    {
                        warn!(error = %err, "skipping unreadable directory");
                    }
                    other => other?,
                }
                continue;
            }
            if !self.fs.is_file(&path) {
                continue;
            }

            let Some(rel) = relative_str(&config.root, &path) else {
                continue;
            };
            if !is_watched(&config.include, &config.exclude, &rel) {
                continue;
            }

            let fingerprint = match compute_file_hash(self.fs.as_ref(), &path) {
                Ok(hash) => hash,
                Err(err) => match config.on_hash_error {
                    HashErrorPolicy::Abort => return Err(err),
                    HashErrorPolicy::Skip => {
                        warn!(error = %err, "skipping unreadable file");
                        continue;
                    }
                },
            };

            let key = display_path(&config.root, &rel);
            if self.table.record(&key, fingerprint) {
                debug!(path = %key, "content changed");
                changes.push(key);
            }
        }

        Ok(())
    }
}
