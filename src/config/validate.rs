// src/config/validate.rs

use tracing::warn;

use crate::config::model::{RawConfigFile, WatchConfig};
use crate::errors::{KigoError, Result};
use crate::watch::PatternSet;

impl TryFrom<RawConfigFile> for WatchConfig {
    type Error = KigoError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let include = PatternSet::compile(&raw.include_patterns)?;
        let exclude = PatternSet::compile(&raw.exclude_patterns)?;

        if include.is_empty() {
            warn!("include_patterns is empty; no file will ever be watched");
        }

        Ok(WatchConfig::new_unchecked(raw, include, exclude))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_root(cfg)?;
    validate_commands(cfg)?;
    Ok(())
}

fn validate_root(cfg: &RawConfigFile) -> Result<()> {
    if cfg.root_path.trim().is_empty() {
        return Err(KigoError::ConfigError(
            "root_path must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (idx, cmd) in cfg.commands.iter().enumerate() {
        if cmd.split_whitespace().next().is_none() {
            return Err(KigoError::ConfigError(format!(
                "commands[{idx}] is blank; every command needs an executable"
            )));
        }
    }
    Ok(())
}
