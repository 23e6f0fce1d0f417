//! Fluids and the registry that resolves fluid ids.

use std::collections::BTreeMap;

use hf_core::{DEFAULT_NAMESPACE, ResourceId};
use tracing::warn;

/// Path of the empty fluid in the default namespace.
pub const EMPTY_FLUID_PATH: &str = "empty";

/// A fluid. Materials refer to one by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fluid {
    id: ResourceId,
}

impl Fluid {
    /// A fluid with the given id.
    pub fn new(id: ResourceId) -> Self {
        Self { id }
    }

    /// The empty fluid, `hookforge:empty`.
    pub fn empty() -> Self {
        Self {
            id: empty_fluid_id(),
        }
    }

    /// The fluid id.
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Returns true for the empty fluid.
    pub fn is_empty(&self) -> bool {
        self.id.namespace() == DEFAULT_NAMESPACE && self.id.path() == EMPTY_FLUID_PATH
    }
}

impl Default for Fluid {
    fn default() -> Self {
        Self::empty()
    }
}

/// Id of the empty fluid.
pub fn empty_fluid_id() -> ResourceId {
    ResourceId::builtin(EMPTY_FLUID_PATH)
}

/// Looks up fluids by id.
pub trait FluidRegistry: Send + Sync {
    /// The fluid registered under `id`, if any.
    fn get(&self, id: &ResourceId) -> Option<Fluid>;

    /// The fluid registered under `id`, or the empty fluid with a warning.
    fn resolve(&self, id: &ResourceId) -> Fluid {
        self.get(id).unwrap_or_else(|| {
            warn!(fluid = %id, "unknown fluid, using empty");
            Fluid::empty()
        })
    }
}

/// A fixed table of fluids.
#[derive(Debug, Clone, Default)]
pub struct FluidTable {
    fluids: BTreeMap<ResourceId, Fluid>,
}

impl FluidTable {
    /// A table holding only the empty fluid.
    pub fn new() -> Self {
        let mut table = Self::default();
        table.register(Fluid::empty());
        table
    }

    /// The empty fluid plus `water` and `lava`.
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        table.register(Fluid::new(ResourceId::builtin("water")));
        table.register(Fluid::new(ResourceId::builtin("lava")));
        table
    }

    /// Add a fluid, replacing any with the same id.
    pub fn register(&mut self, fluid: Fluid) {
        self.fluids.insert(fluid.id().clone(), fluid);
    }

    /// Registered fluid ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.fluids.keys()
    }
}

impl FluidRegistry for FluidTable {
    fn get(&self, id: &ResourceId) -> Option<Fluid> {
        self.fluids.get(id).cloned()
    }
}

impl FromIterator<Fluid> for FluidTable {
    fn from_iter<I: IntoIterator<Item = Fluid>>(iter: I) -> Self {
        let mut table = Self::new();
        for fluid in iter {
            table.register(fluid);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    #[test]
    fn empty_fluid() {
        let fluid = Fluid::empty();
        assert!(fluid.is_empty());
        assert_eq!(fluid.id().to_string(), "hookforge:empty");
        assert!(!Fluid::new(id("water")).is_empty());
    }

    #[test]
    fn defaults_include_water_and_lava() {
        let table = FluidTable::with_defaults();
        let ids: Vec<_> = table.ids().map(ToString::to_string).collect();
        assert_eq!(
            ids,
            vec!["hookforge:empty", "hookforge:lava", "hookforge:water"]
        );
    }

    #[test]
    fn unknown_fluid_resolves_to_empty() {
        let table = FluidTable::with_defaults();
        assert_eq!(table.resolve(&id("water")), Fluid::new(id("water")));
        assert!(table.resolve(&id("molten_cheese")).is_empty());
        assert!(table.get(&id("molten_cheese")).is_none());
    }

    #[test]
    fn collect_into_table() {
        let table: FluidTable = [Fluid::new(id("custom:slime"))].into_iter().collect();
        assert!(table.get(&id("custom:slime")).is_some());
        assert!(table.get(&id("empty")).is_some());
    }
}
