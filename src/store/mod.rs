//! Layered override store
//!
//! Two independent maps back the registration surface: generic defaults
//! keyed by scope and generic name, and PLI library lists keyed by scope.
//! A write replaces the prior value for its exact key; a lookup walks the
//! scope chain most-specific-first. "Most recent write" and "most specific
//! scope" are orthogonal axes - only the latter orders scopes.

use serde_json::Value;
use std::collections::HashMap;

use crate::scope::Scope;

/// Scope-layered defaults for generic values and PLI library lists
#[derive(Debug, Default)]
pub struct OverrideStore {
    generics: HashMap<Scope, HashMap<String, Value>>,
    pli: HashMap<Scope, Vec<String>>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or replace the default value for a generic at a scope.
    ///
    /// `Value::Null` is an ordinary stored value, not a deletion. The name
    /// is not checked against any entity here; names no entity declares
    /// are dropped at resolution time.
    pub fn set_generic(&mut self, name: impl Into<String>, value: Value, scope: Scope) {
        self.generics
            .entry(scope)
            .or_default()
            .insert(name.into(), value);
    }

    /// Record or replace the full PLI library list for a scope.
    ///
    /// An empty list is a valid registration that shadows less specific
    /// scopes; it is distinct from never having written the scope.
    pub fn set_pli(&mut self, libraries: Vec<String>, scope: Scope) {
        self.pli.insert(scope, libraries);
    }

    /// Look up the generic default applying to an entity.
    ///
    /// Tries entity scope, then library scope, then global scope; returns
    /// the first registered value, or `None` if no scope has one.
    pub fn resolve_generic(&self, library: &str, entity: &str, name: &str) -> Option<&Value> {
        Scope::chain(library, entity)
            .iter()
            .find_map(|scope| self.generics.get(scope).and_then(|m| m.get(name)))
    }

    /// Look up the PLI library list applying to an entity.
    ///
    /// Same three-level fallback as `resolve_generic`.
    pub fn resolve_pli(&self, library: &str, entity: &str) -> Option<&[String]> {
        Scope::chain(library, entity)
            .iter()
            .find_map(|scope| self.pli.get(scope).map(Vec::as_slice))
    }
}
