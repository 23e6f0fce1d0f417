//! Sinks that record what they receive.

use hf_core::ResourceId;
use hf_materials::{Material, MaterialSink};
use hf_modifiers::{ComposableModifier, ModifierSink};
use parking_lot::Mutex;

#[derive(Default)]
pub(crate) struct RecordingSink {
    materials: Mutex<Vec<Vec<Material>>>,
    modifiers: Mutex<Vec<Vec<(ResourceId, ComposableModifier)>>>,
}

impl RecordingSink {
    pub(crate) fn material_calls(&self) -> Vec<Vec<Material>> {
        self.materials.lock().clone()
    }

    pub(crate) fn modifier_calls(&self) -> Vec<Vec<(ResourceId, ComposableModifier)>> {
        self.modifiers.lock().clone()
    }
}

impl MaterialSink for RecordingSink {
    fn update_materials_from_server(&self, materials: Vec<Material>) {
        self.materials.lock().push(materials);
    }
}

impl ModifierSink for RecordingSink {
    fn update_modifiers_from_server(&self, modifiers: Vec<(ResourceId, ComposableModifier)>) {
        self.modifiers.lock().push(modifiers);
    }
}
