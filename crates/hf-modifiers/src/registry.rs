//! The client-side store of synced modifiers.

use std::collections::HashMap;
use std::sync::Arc;

use hf_core::ResourceId;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::modifier::ComposableModifier;

/// Receives the full modifier set sent by a server.
pub trait ModifierSink: Send + Sync {
    /// Replace every known modifier with `modifiers`.
    fn update_modifiers_from_server(&self, modifiers: Vec<(ResourceId, ComposableModifier)>);
}

/// Thread-safe modifier lookup, replaced wholesale on each sync.
#[derive(Debug, Default)]
pub struct ModifierRegistry {
    modifiers: RwLock<HashMap<ResourceId, Arc<ComposableModifier>>>,
}

impl ModifierRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a modifier.
    pub fn get(&self, id: &ResourceId) -> Option<Arc<ComposableModifier>> {
        self.modifiers.read().get(id).cloned()
    }

    /// All modifiers, highest priority first; ties ordered by id.
    pub fn by_priority(&self) -> Vec<(ResourceId, Arc<ComposableModifier>)> {
        let mut all: Vec<_> = self
            .modifiers
            .read()
            .iter()
            .map(|(id, m)| (id.clone(), Arc::clone(m)))
            .collect();
        all.sort_by(|(a_id, a), (b_id, b)| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a_id.cmp(b_id))
        });
        all
    }

    /// Number of modifiers.
    pub fn len(&self) -> usize {
        self.modifiers.read().len()
    }

    /// Returns true if nothing has been synced.
    pub fn is_empty(&self) -> bool {
        self.modifiers.read().is_empty()
    }
}

impl ModifierSink for ModifierRegistry {
    fn update_modifiers_from_server(&self, modifiers: Vec<(ResourceId, ComposableModifier)>) {
        let mut map = HashMap::with_capacity(modifiers.len());
        for (id, modifier) in modifiers {
            if let Some(previous) = map.insert(id.clone(), Arc::new(modifier)) {
                warn!(
                    %id,
                    replaced_priority = previous.priority(),
                    "duplicate modifier id from server, keeping the last"
                );
            }
        }
        debug!(count = map.len(), "replaced modifiers from server");
        *self.modifiers.write() = map;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(path: &str) -> ResourceId {
        ResourceId::parse(path).unwrap()
    }

    fn with_priority(priority: i32) -> ComposableModifier {
        ComposableModifier::builder().priority(priority).build().unwrap()
    }

    #[test]
    fn update_replaces_contents() {
        let registry = ModifierRegistry::new();
        assert!(registry.is_empty());
        registry.update_modifiers_from_server(vec![
            (id("haste"), with_priority(1)),
            (id("reinforced"), with_priority(2)),
        ]);
        assert_eq!(registry.len(), 2);

        registry.update_modifiers_from_server(vec![(id("silky"), with_priority(3))]);
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&id("haste")).is_none());
        assert_eq!(registry.get(&id("silky")).unwrap().priority(), 3);
    }

    #[test]
    fn duplicate_ids_keep_the_last() {
        let registry = ModifierRegistry::new();
        registry.update_modifiers_from_server(vec![
            (id("haste"), with_priority(1)),
            (id("silky"), with_priority(2)),
            (id("haste"), with_priority(7)),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&id("haste")).unwrap().priority(), 7);
    }

    #[test]
    fn listing_is_ordered_by_priority_then_id() {
        let registry = ModifierRegistry::new();
        registry.update_modifiers_from_server(vec![
            (id("b"), with_priority(10)),
            (id("a"), with_priority(10)),
            (id("c"), with_priority(50)),
            (id("d"), with_priority(-5)),
        ]);
        let order: Vec<_> = registry
            .by_priority()
            .into_iter()
            .map(|(id, _)| id.path().to_string())
            .collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }
}
