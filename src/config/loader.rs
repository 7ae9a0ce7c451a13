// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawConfigFile, WatchConfig};
use crate::errors::{KigoError, Result};

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization (which already rejects unknown
/// keys); it does **not** compile patterns. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|err| {
        KigoError::ConfigError(format!("reading config file {}: {err}", path.display()))
    })?;

    let config: RawConfigFile = toml::from_str(&contents).map_err(|err| {
        KigoError::ConfigError(format!("parsing config file {}: {err}", path.display()))
    })?;

    Ok(config)
}

/// Load a configuration file from path, validate it and compile its patterns.
///
/// This is the entry point used by `kigo run`.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<WatchConfig> {
    let raw_config = load_from_path(&path)?;
    let config = WatchConfig::try_from(raw_config)?;
    Ok(config)
}

/// Config path used when `--config` is not given.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Kigo.toml")
}
