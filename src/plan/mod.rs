//! Declarative test plans (TOML)
//!
//! Registrations can be driven from a plan file instead of API calls:
//! scope-level generic defaults, scope-level PLI lists, and named
//! sub-configurations, applied to a resolver in file order.
//!
//! ```toml
//! [[generics]]
//! name = "data_width"
//! value = 8
//! scope = "lib.tb_fifo"
//!
//! [[pli]]
//! libraries = ["libvpi.so"]
//! scope = "lib"
//!
//! [[configs]]
//! entity = "lib.tb_fifo"
//! name = "depth=4"
//! generics = { depth = 4 }
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::registry::RegistryError;
use crate::resolver::ConfigResolver;
use crate::scope::{Scope, ScopeError};

/// Error types for plan loading and application
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Failed to read plan file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error(transparent)]
    ScopeError(#[from] ScopeError),

    #[error(transparent)]
    RegistryError(#[from] RegistryError),

    #[error("Invalid entity identifier '{0}': expected \"<library>.<entity>\"")]
    InvalidEntityIdentifier(String),
}

/// A scope-level generic default declared in a plan
#[derive(Debug, Clone, Deserialize)]
pub struct GenericDefault {
    /// Generic identifier
    pub name: String,

    /// Value to assign; `value = false`, numbers, and strings all pass
    /// through untouched
    pub value: Value,

    /// Scope string; empty or omitted means global
    #[serde(default)]
    pub scope: String,
}

/// A scope-level PLI registration declared in a plan
#[derive(Debug, Clone, Deserialize)]
pub struct PliDefault {
    /// Plugin libraries, in load order. An empty list clears PLI for
    /// the scope.
    pub libraries: Vec<String>,

    /// Scope string; empty or omitted means global
    #[serde(default)]
    pub scope: String,
}

/// A named sub-configuration declared in a plan.
///
/// There is deliberately no per-config `pli` key: sub-configurations
/// inherit the scope-resolved PLI list.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    /// Entity identifier: "<library>.<entity>"
    pub entity: String,

    /// Configuration name suffix
    pub name: String,

    /// Local generic overrides
    #[serde(default)]
    pub generics: BTreeMap<String, Value>,
}

/// A declarative test plan, parsed from TOML
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestPlan {
    /// Scope-level generic defaults, applied in file order
    #[serde(default)]
    pub generics: Vec<GenericDefault>,

    /// Scope-level PLI registrations, applied in file order
    #[serde(default)]
    pub pli: Vec<PliDefault>,

    /// Named sub-configurations, registered in file order
    #[serde(default)]
    pub configs: Vec<PlanConfig>,
}

impl TestPlan {
    /// Load and parse a plan from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    /// Parse a plan from a TOML string
    pub fn from_str(s: &str) -> Result<Self, PlanError> {
        let plan: TestPlan = toml::from_str(s)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Validate scope strings and entity identifiers without applying
    pub fn validate(&self) -> Result<(), PlanError> {
        for generic in &self.generics {
            generic.scope.parse::<Scope>()?;
        }
        for pli in &self.pli {
            pli.scope.parse::<Scope>()?;
        }
        for config in &self.configs {
            // Entity identifiers are exactly the entity-scope shape
            match config.entity.parse::<Scope>() {
                Ok(Scope::Entity { .. }) => {}
                _ => return Err(PlanError::InvalidEntityIdentifier(config.entity.clone())),
            }
        }
        Ok(())
    }

    /// Apply every registration in this plan to a resolver, in file order
    pub fn apply(&self, resolver: &mut ConfigResolver) -> Result<(), PlanError> {
        for generic in &self.generics {
            let scope = generic.scope.parse::<Scope>()?;
            resolver.set_generic(&generic.name, generic.value.clone(), scope);
        }
        for pli in &self.pli {
            let scope = pli.scope.parse::<Scope>()?;
            resolver.set_pli(pli.libraries.clone(), scope);
        }
        for config in &self.configs {
            resolver.add_config(&config.entity, &config.name, config.generics.clone())?;
        }
        Ok(())
    }
}
