//! Named sub-configuration registry
//!
//! Test authors can declare explicit sub-configurations for an entity,
//! each with a name suffix and local generic overrides. Registration
//! order is preserved; local generics are snapshotted at registration
//! time and are never affected by later scope-default writes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Error types for sub-configuration registration
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two sub-configurations registered under the same entity and name
    #[error("Duplicate configuration name '{name}' for entity {entity}")]
    DuplicateConfigurationName { entity: String, name: String },
}

/// An explicitly declared sub-configuration for one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedConfig {
    /// Name suffix appended to the entity identifier
    pub name: String,

    /// Local generic overrides, snapshotted at registration time.
    /// These take absolute precedence over any scope default.
    #[serde(default)]
    pub generics: BTreeMap<String, Value>,
}

/// Per-entity ordered lists of named sub-configurations
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    configs: HashMap<String, Vec<NamedConfig>>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-configuration to an entity's ordered list.
    ///
    /// Fails fast if the entity already has a sub-configuration with the
    /// same name.
    pub fn add_config(
        &mut self,
        entity_identifier: &str,
        name: &str,
        generics: BTreeMap<String, Value>,
    ) -> Result<(), RegistryError> {
        let configs = self.configs.entry(entity_identifier.to_string()).or_default();

        if configs.iter().any(|c| c.name == name) {
            return Err(RegistryError::DuplicateConfigurationName {
                entity: entity_identifier.to_string(),
                name: name.to_string(),
            });
        }

        configs.push(NamedConfig {
            name: name.to_string(),
            generics,
        });
        Ok(())
    }

    /// Sub-configurations for an entity, in registration order
    pub fn get_configs(&self, entity_identifier: &str) -> &[NamedConfig] {
        self.configs
            .get(entity_identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
