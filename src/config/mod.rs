// src/config/mod.rs

//! Configuration loading and validation for monobuild.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate file names and project patterns (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_for_repository, load_from_path, CONFIG_FILE_NAME};
pub use model::{ConfigFile, DepsSection, FilesSection, RawConfigFile};
