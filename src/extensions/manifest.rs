//! Extension manifest: the file passed with `-e`.
use std::{fs, path::Path};

use serde::Deserialize;

use crate::lib::errors::ExtensionError;

/// Parsed extension manifest.
///
/// ```toml
/// name = "canfestival"
/// entry = "canfestival"
/// description = "CANopen master support"
///
/// [settings]
/// default_node_id = 1
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtensionManifest {
    pub name: String,
    /// Entry point id invoked after the manifest's resources are registered.
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub settings: toml::Table,
}

impl ExtensionManifest {
    pub fn load(path: &Path) -> Result<Self, ExtensionError> {
        let text = fs::read_to_string(path).map_err(|source| ExtensionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &text)
    }

    pub fn parse(path: &Path, text: &str) -> Result<Self, ExtensionError> {
        let manifest: Self = toml::from_str(text).map_err(|source| ExtensionError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        if manifest.name.trim().is_empty() {
            return Err(ExtensionError::MissingName {
                path: path.to_path_buf(),
            });
        }
        Ok(manifest)
    }
}
