#![allow(dead_code)]

use std::path::Path;

use kigo::config::{RawConfigFile, WatchConfig};
use kigo::types::HashErrorPolicy;

/// Builder for `WatchConfig` to simplify test setup.
pub struct WatchConfigBuilder {
    config: RawConfigFile,
}

impl WatchConfigBuilder {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            config: RawConfigFile {
                root_path: root.as_ref().to_string_lossy().into_owned(),
                delimiter: "-----".to_string(),
                ..RawConfigFile::default()
            },
        }
    }

    pub fn include(mut self, pattern: &str) -> Self {
        self.config.include_patterns.push(pattern.to_string());
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.config.exclude_patterns.push(pattern.to_string());
        self
    }

    pub fn command(mut self, cmd: &str) -> Self {
        self.config.commands.push(cmd.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.config.files_placeholder = Some(placeholder.to_string());
        self
    }

    pub fn interval(mut self, secs: i64) -> Self {
        self.config.interval = secs;
        self
    }

    pub fn on_hash_error(mut self, policy: HashErrorPolicy) -> Self {
        self.config.on_hash_error = policy;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}
