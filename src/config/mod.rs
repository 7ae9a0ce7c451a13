// src/config/mod.rs

//! Configuration loading and validation for kigo.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate values and compile patterns (`validate.rs`).
//! - Materialise tagged default configs (`defaults.rs`).

pub mod defaults;
pub mod loader;
pub mod model;
pub mod validate;

pub use defaults::{create_default_config, BUILTIN_CATALOG};
pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{RawConfigFile, WatchConfig, DEFAULT_FILES_PLACEHOLDER};
