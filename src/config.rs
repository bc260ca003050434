//! Centralized configuration for the fixture-rig engine.
//!
//! This module contains the constants used throughout the crate and the
//! [`Settings`] read from the project manifest, which selects the fixture
//! catalog to activate.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{FixtureError, Result};

/// Reserved suffix stripped from declared fixture identifiers.
///
/// A fixture whose natural name collides with a reserved word can be declared
/// with this marker appended; the canonical name under which its value is
/// stored never carries the suffix.
pub const RESERVED_SUFFIX: &str = "_fixture";

/// Conventional catalog path used when the manifest declares none.
pub const DEFAULT_CATALOG_PATH: &str = "tests::fixtures";

/// Name of the metadata table consulted in the project manifest,
/// i.e. `[package.metadata.fixture-rig]`.
pub const SETTINGS_TABLE: &str = "fixture-rig";

/// File name of the project manifest the settings are read from.
pub const MANIFEST_FILE: &str = "Cargo.toml";

/// Engine settings sourced from the project manifest.
///
/// Read from `[package.metadata.fixture-rig]` in the `Cargo.toml` of the
/// current directory. A missing manifest or missing table falls back to the
/// defaults; a manifest that exists but cannot be parsed is a fatal
/// [`FixtureError::Config`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    /// Path of the fixture catalog to activate.
    #[serde(default = "default_catalog")]
    pub catalog: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            catalog: DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}

fn default_catalog() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

impl Settings {
    /// Loads settings from the manifest in the current directory.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| FixtureError::Config {
            reason: format!("Failed to determine current directory: {}", e),
        })?;
        Self::load_from(&cwd)
    }

    /// Loads settings from the manifest in the given directory.
    ///
    /// A missing manifest yields the defaults. A manifest that cannot be read
    /// for any other reason, or whose contents are not valid TOML, is an error.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let contents = match fs::read_to_string(&manifest_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(FixtureError::Config {
                    reason: format!("Failed to read {}: {}", manifest_path.display(), e),
                })
            }
        };

        let manifest: toml::Value = toml::from_str(&contents).map_err(|e| FixtureError::Config {
            reason: format!("Failed to parse {}: {}", manifest_path.display(), e),
        })?;

        let table = manifest
            .get("package")
            .and_then(|package| package.get("metadata"))
            .and_then(|metadata| metadata.get(SETTINGS_TABLE));

        match table {
            Some(table) => table.clone().try_into().map_err(|e| FixtureError::Config {
                reason: format!(
                    "Invalid [package.metadata.{}] table in {}: {}",
                    SETTINGS_TABLE,
                    manifest_path.display(),
                    e
                ),
            }),
            None => Ok(Settings::default()),
        }
    }
}
