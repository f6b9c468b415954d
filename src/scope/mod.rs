//! Scope keys for override registration
//!
//! A default generic value or PLI list is registered at one of three
//! scopes: global (`""`), a design library (`"lib"`), or a single entity
//! (`"lib.tb_entity"`). Precedence between scopes is structural, not
//! temporal: entity scope beats library scope beats global scope no matter
//! in which order the registrations happened.

use std::fmt;
use std::str::FromStr;

/// Scope parsing errors
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Scope string does not match "", "<library>" or "<library>.<entity>"
    #[error("Malformed scope '{0}': expected \"\", \"<library>\" or \"<library>.<entity>\"")]
    MalformedScope(String),
}

/// Scope at which a default generic value or PLI list applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Applies to every entity (the empty scope string)
    Global,
    /// Applies to every entity compiled into one design library
    Library(String),
    /// Applies to one specific entity
    Entity { library: String, entity: String },
}

impl Scope {
    /// Build the entity scope for a (library, entity) pair
    pub fn entity(library: impl Into<String>, entity: impl Into<String>) -> Self {
        Scope::Entity {
            library: library.into(),
            entity: entity.into(),
        }
    }

    /// Lookup chain for an entity, most specific scope first.
    ///
    /// Resolution walks this chain and takes the first scope that has a
    /// registration.
    pub fn chain(library: &str, entity: &str) -> [Scope; 3] {
        [
            Scope::entity(library, entity),
            Scope::Library(library.to_string()),
            Scope::Global,
        ]
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => Ok(()),
            Scope::Library(library) => write!(f, "{}", library),
            Scope::Entity { library, entity } => write!(f, "{}.{}", library, entity),
        }
    }
}

impl FromStr for Scope {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Scope::Global);
        }

        let mut segments = s.split('.');
        let library = segments.next().unwrap_or_default();
        let entity = segments.next();

        // No empty segments, no third segment
        if library.is_empty() || entity == Some("") || segments.next().is_some() {
            return Err(ScopeError::MalformedScope(s.to_string()));
        }

        match entity {
            Some(entity) => Ok(Scope::entity(library, entity)),
            None => Ok(Scope::Library(library.to_string())),
        }
    }
}
