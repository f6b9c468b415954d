//! simcfg - Testbench configuration resolver for HDL simulation runs
//!
//! This crate resolves, for a given testbench entity and architecture,
//! the final ordered set of named test configurations: generic value
//! assignments plus the PLI plugin libraries to load. Defaults are
//! registered at global, library, or entity scope with structural
//! precedence (most specific scope wins); explicitly named
//! sub-configurations carry local overrides that always beat scope
//! defaults, regardless of registration order.

pub mod entity;
pub mod plan;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod store;

pub use entity::{EntityDescription, EntityError};
pub use plan::{PlanError, TestPlan};
pub use registry::{ConfigRegistry, NamedConfig, RegistryError};
pub use resolver::{ConfigResolver, Configuration, ResolveError};
pub use scope::{Scope, ScopeError};
pub use store::OverrideStore;
