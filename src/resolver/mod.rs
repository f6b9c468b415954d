//! Configuration resolution
//!
//! `ConfigResolver` is the public entry point: it owns one override store
//! and one sub-configuration registry, and combines them per entity and
//! architecture into the final ordered list of configurations to run.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::entity::EntityDescription;
use crate::registry::{ConfigRegistry, RegistryError};
use crate::scope::Scope;
use crate::store::OverrideStore;

/// Error types for configuration resolution
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Resolution requested for an architecture the entity does not declare
    #[error("Entity {entity} has no architecture named '{architecture}'")]
    UnknownArchitecture {
        entity: String,
        architecture: String,
    },
}

/// One concrete simulation run: a named set of generic assignments plus
/// the PLI libraries to load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// "<library>.<entity>" or "<library>.<entity>.<name>"
    pub identifier: String,

    /// Generic assignments. Only generics with some registered override
    /// are present; undeclared or un-overridden generics are absent.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub generics: BTreeMap<String, Value>,

    /// PLI libraries to load, empty if no scope registration applies
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pli: Vec<String>,
}

impl Configuration {
    /// Bare configuration with no generics and no PLI
    pub fn new(identifier: impl Into<String>) -> Self {
        Configuration {
            identifier: identifier.into(),
            generics: BTreeMap::new(),
            pli: Vec::new(),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Resolves the final set of configurations for an entity/architecture pair
#[derive(Debug, Default)]
pub struct ConfigResolver {
    store: OverrideStore,
    registry: ConfigRegistry,
}

impl ConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the default value for a generic at a scope
    pub fn set_generic(&mut self, name: impl Into<String>, value: Value, scope: Scope) {
        self.store.set_generic(name, value, scope);
    }

    /// Record or replace the PLI library list for a scope
    pub fn set_pli(&mut self, libraries: Vec<String>, scope: Scope) {
        self.store.set_pli(libraries, scope);
    }

    /// Register a named sub-configuration for an entity identifier
    pub fn add_config(
        &mut self,
        entity_identifier: &str,
        name: &str,
        generics: BTreeMap<String, Value>,
    ) -> Result<(), RegistryError> {
        self.registry.add_config(entity_identifier, name, generics)
    }

    /// Resolve the ordered list of configurations for an entity and
    /// architecture.
    ///
    /// If the entity has named sub-configurations, exactly those are
    /// returned in registration order, each with its local generics laid
    /// over the scope-resolved defaults. Otherwise a single default
    /// configuration named after the entity identifier is returned.
    /// Pure read; repeated calls with unchanged registrations yield equal
    /// results.
    pub fn get_configurations(
        &self,
        entity: &EntityDescription,
        architecture_name: &str,
    ) -> Result<Vec<Configuration>, ResolveError> {
        if !entity.architecture_names.contains_key(architecture_name) {
            return Err(ResolveError::UnknownArchitecture {
                entity: entity.identifier(),
                architecture: architecture_name.to_string(),
            });
        }

        let identifier = entity.identifier();
        let scoped = self.scope_resolved_generics(entity);
        let pli: Vec<String> = self
            .store
            .resolve_pli(&entity.library_name, &entity.name)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let named = self.registry.get_configs(&identifier);
        if named.is_empty() {
            return Ok(vec![Configuration {
                identifier,
                generics: scoped,
                pli,
            }]);
        }

        let configurations = named
            .iter()
            .map(|config| {
                let mut generics = scoped.clone();
                for (name, value) in &config.generics {
                    if entity.declares_generic(name) {
                        generics.insert(name.clone(), value.clone());
                    }
                }
                Configuration {
                    identifier: format!("{}.{}", identifier, config.name),
                    generics,
                    pli: pli.clone(),
                }
            })
            .collect();
        Ok(configurations)
    }

    /// Scope-level defaults applying to this entity, filtered to its
    /// declared generic names
    fn scope_resolved_generics(&self, entity: &EntityDescription) -> BTreeMap<String, Value> {
        entity
            .generic_names
            .iter()
            .filter_map(|name| {
                self.store
                    .resolve_generic(&entity.library_name, &entity.name, name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }
}
