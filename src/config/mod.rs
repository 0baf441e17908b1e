// src/config/mod.rs

//! Configuration loading and validation for javalaunch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate the raw file into a [`ConfigFile`] (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, discover, load_and_validate, load_from_path};
pub use model::{
    ConfigFile, GraphGenSection, JavaSection, RawConfigFile, RunSection, SearchSection,
};
