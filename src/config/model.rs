use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::HashErrorPolicy;
use crate::watch::PatternSet;

/// Placeholder replaced by the changed-file list when `files_placeholder`
/// is unset or empty.
pub const DEFAULT_FILES_PLACEHOLDER: &str = "<files>";

/// Polling intervals below this are clamped up to it.
pub const MIN_INTERVAL_SECS: u64 = 1;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// root_path = "."
/// include_patterns = ["*.go"]
/// exclude_patterns = ["*.git*", "vendor*"]
/// delimiter = "-----"
/// interval = 2
/// files_placeholder = "<files>"
/// commands = ["gofmt -w <files>", "go test ./..."]
/// ```
///
/// Unknown keys are rejected. Missing keys take their zero value
/// (`root_path` falls back to `"."`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfigFile {
    /// Directory that is walked every cycle.
    pub root_path: String,

    /// A file must match at least one of these to be watched.
    pub include_patterns: Vec<String>,

    /// A file matching any of these is never watched.
    pub exclude_patterns: Vec<String>,

    /// Label printed in front of every command output block.
    pub delimiter: String,

    /// Polling interval in seconds.
    pub interval: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_placeholder: Option<String>,

    /// Behaviour when a watched file cannot be read during a walk.
    pub on_hash_error: HashErrorPolicy,

    /// Command templates, run in order.
    pub commands: Vec<String>,
}

impl Default for RawConfigFile {
    fn default() -> Self {
        Self {
            root_path: ".".to_string(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            delimiter: String::new(),
            interval: MIN_INTERVAL_SECS as i64,
            files_placeholder: None,
            on_hash_error: HashErrorPolicy::default(),
            commands: Vec::new(),
        }
    }
}

/// Validated, compiled configuration handed to the watch engine.
///
/// Can only be built through `TryFrom<RawConfigFile>`, so holding one means
/// the patterns compiled and the values are in range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub root: PathBuf,
    pub include: PatternSet,
    pub exclude: PatternSet,
    pub commands: Vec<String>,
    pub placeholder: String,
    pub delimiter: String,
    /// Already clamped to at least [`MIN_INTERVAL_SECS`].
    pub interval: Duration,
    pub on_hash_error: HashErrorPolicy,
}

impl WatchConfig {
    pub(crate) fn new_unchecked(
        raw: RawConfigFile,
        include: PatternSet,
        exclude: PatternSet,
    ) -> Self {
        let placeholder = match raw.files_placeholder {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_FILES_PLACEHOLDER.to_string(),
        };

        Self {
            root: PathBuf::from(raw.root_path),
            include,
            exclude,
            commands: raw.commands,
            placeholder,
            delimiter: raw.delimiter,
            interval: clamp_interval(raw.interval),
            on_hash_error: raw.on_hash_error,
        }
    }
}

/// Interval in seconds -> sleep duration, never shorter than one second.
pub fn clamp_interval(secs: i64) -> Duration {
    let secs = u64::try_from(secs).unwrap_or(0).max(MIN_INTERVAL_SECS);
    Duration::from_secs(secs)
}

impl From<&WatchConfig> for RawConfigFile {
    fn from(cfg: &WatchConfig) -> Self {
        Self {
            root_path: cfg.root.to_string_lossy().into_owned(),
            include_patterns: cfg.include.sources(),
            exclude_patterns: cfg.exclude.sources(),
            delimiter: cfg.delimiter.clone(),
            interval: cfg.interval.as_secs() as i64,
            files_placeholder: Some(cfg.placeholder.clone()),
            on_hash_error: cfg.on_hash_error,
            commands: cfg.commands.clone(),
        }
    }
}
