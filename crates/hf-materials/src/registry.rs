//! The client-side store of synced materials.

use std::sync::Arc;

use hf_core::ResourceId;
use parking_lot::RwLock;
use tracing::debug;

use crate::material::Material;

/// Receives the full material set sent by a server.
pub trait MaterialSink: Send + Sync {
    /// Replace every known material with `materials`, keeping their order.
    fn update_materials_from_server(&self, materials: Vec<Material>);
}

/// Thread-safe material lookup, replaced wholesale on each sync.
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    materials: RwLock<Vec<Arc<Material>>>,
}

impl MaterialRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a material.
    pub fn get(&self, id: &ResourceId) -> Option<Arc<Material>> {
        self.materials.read().iter().find(|m| m.id() == id).cloned()
    }

    /// All materials in the order the server sent them.
    pub fn all(&self) -> Vec<Arc<Material>> {
        self.materials.read().clone()
    }

    /// Materials usable in part crafting, in sync order.
    pub fn craftable(&self) -> Vec<Arc<Material>> {
        self.materials
            .read()
            .iter()
            .filter(|m| m.is_craftable())
            .cloned()
            .collect()
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.read().len()
    }

    /// Returns true if nothing has been synced.
    pub fn is_empty(&self) -> bool {
        self.materials.read().is_empty()
    }
}

impl MaterialSink for MaterialRegistry {
    fn update_materials_from_server(&self, materials: Vec<Material>) {
        let materials: Vec<_> = materials.into_iter().map(Arc::new).collect();
        debug!(count = materials.len(), "replaced materials from server");
        *self.materials.write() = materials;
    }
}
