//! Testbench entity descriptions
//!
//! The resolver does not discover or parse HDL sources itself; the
//! scanning collaborator hands it an `EntityDescription` per testbench.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error types for loading entity descriptions
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    #[error("Failed to read entity description: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse entity description: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Description of a testbench entity, as produced by source scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Entity name (e.g., "tb_fifo")
    pub name: String,

    /// Design library the entity is compiled into
    pub library_name: String,

    /// Architecture name to the source file declaring it.
    /// Resolution only checks key existence, never file content.
    pub architecture_names: BTreeMap<String, PathBuf>,

    /// Generic identifiers declared by the entity, in declaration order.
    /// Only these names are eligible for override.
    #[serde(default)]
    pub generic_names: Vec<String>,
}

impl EntityDescription {
    /// Fully qualified identifier: "<library>.<entity>"
    pub fn identifier(&self) -> String {
        format!("{}.{}", self.library_name, self.name)
    }

    /// Whether the entity declares a generic with this name
    pub fn declares_generic(&self, name: &str) -> bool {
        self.generic_names.iter().any(|g| g == name)
    }

    /// Load an entity description from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, EntityError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
