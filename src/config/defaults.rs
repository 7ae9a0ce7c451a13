// src/config/defaults.rs

//! Catalog of ready-made configurations, keyed by tag.
//!
//! The catalog is embedded in the binary and only consulted by
//! `kigo create`; the watch engine never reads it.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::config::model::{RawConfigFile, WatchConfig};
use crate::errors::{KigoError, Result};

/// The catalog shipped with kigo.
pub const BUILTIN_CATALOG: &str = include_str!("../../defaults/defaults.toml");

/// One tagged entry of the catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultConfig {
    pub tag: String,
    pub configuration: RawConfigFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultCatalog {
    #[serde(default)]
    defaults: Vec<DefaultConfig>,
}

/// Parse a catalog document (`[[defaults]]` entries).
pub fn parse_catalog(src: &str) -> Result<Vec<DefaultConfig>> {
    let catalog: DefaultCatalog = toml::from_str(src)?;
    Ok(catalog.defaults)
}

/// Find the configuration registered under `tag`.
pub fn find_default<'a>(catalog: &'a [DefaultConfig], tag: &str) -> Result<&'a RawConfigFile> {
    catalog
        .iter()
        .find(|d| d.tag == tag)
        .map(|d| &d.configuration)
        .ok_or_else(|| KigoError::UnknownTag(tag.to_string()))
}

/// Serialize `config` as TOML into `out`, replacing any existing file.
pub fn write_config(config: &RawConfigFile, out: &Path) -> Result<()> {
    let serialized = toml::to_string_pretty(config)?;
    fs::write(out, serialized).map_err(|err| {
        KigoError::ConfigError(format!("writing config to {}: {err}", out.display()))
    })?;
    Ok(())
}

/// Look up `tag` in the catalog and write its configuration to `out`.
///
/// The entry is validated first so a broken catalog entry never reaches disk.
pub fn create_default_config(catalog_src: &str, tag: &str, out: &Path) -> Result<()> {
    let catalog = parse_catalog(catalog_src)?;
    let config = find_default(&catalog, tag)?;
    WatchConfig::try_from(config.clone())?;

    write_config(config, out)?;
    info!(tag = %tag, out = %out.display(), "wrote default config");
    Ok(())
}

/// Tags available in a catalog, in catalog order.
pub fn available_tags(catalog_src: &str) -> Result<Vec<String>> {
    Ok(parse_catalog(catalog_src)?
        .into_iter()
        .map(|d| d.tag)
        .collect())
}
