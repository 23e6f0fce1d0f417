//! Material definitions and their structured form.

use hf_core::{ContentError, ContentResult, JsonObject, ResourceId};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fluid::{Fluid, FluidRegistry, empty_fluid_id};
use crate::stack::ItemStack;

/// A craftable substance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    id: ResourceId,
    craftable: bool,
    fluid: Fluid,
    shard: ItemStack,
}

impl Material {
    /// Build a material.
    pub fn new(id: ResourceId, craftable: bool, fluid: Fluid, shard: ItemStack) -> Self {
        Self {
            id,
            craftable,
            fluid,
            shard,
        }
    }

    /// The material id.
    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    /// Whether the material can be used in part crafting.
    pub fn is_craftable(&self) -> bool {
        self.craftable
    }

    /// The fluid form of the material.
    pub fn fluid(&self) -> &Fluid {
        &self.fluid
    }

    /// The shard item; may be empty.
    pub fn shard(&self) -> &ItemStack {
        &self.shard
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialJson {
    id: ResourceId,
    #[serde(default)]
    craftable: bool,
    #[serde(default = "empty_fluid_id")]
    fluid: ResourceId,
    #[serde(default)]
    shard: Option<ItemStack>,
}

/// Reads and writes materials in their structured form, resolving fluids
/// through a [`FluidRegistry`].
pub struct MaterialLoader<'a> {
    fluids: &'a dyn FluidRegistry,
}

impl<'a> MaterialLoader<'a> {
    /// A loader resolving fluids through `fluids`.
    pub fn new(fluids: &'a dyn FluidRegistry) -> Self {
        Self { fluids }
    }

    /// Read one material. Unknown fluids fall back to the empty fluid.
    pub fn deserialize(&self, value: &Value) -> ContentResult<Material> {
        let raw: MaterialJson = serde_json::from_value(value.clone())?;
        let shard = raw.shard.unwrap_or_default();
        Ok(Material::new(
            raw.id,
            raw.craftable,
            self.fluids.resolve(&raw.fluid),
            shard,
        ))
    }

    /// Read a JSON array of materials. Fails on the first bad entry.
    pub fn parse_list(&self, text: &str) -> ContentResult<Vec<Material>> {
        let value: Value = serde_json::from_str(text)?;
        let items = value
            .as_array()
            .ok_or_else(|| ContentError::syntax("expected an array of materials"))?;
        let materials = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.deserialize(item).map_err(|e| {
                    warn!(index = i, error = %e, "rejected material definition");
                    ContentError::syntax(format!("materials[{i}]: {e}"))
                })
            })
            .collect::<ContentResult<Vec<_>>>()?;
        debug!(count = materials.len(), "loaded materials");
        Ok(materials)
    }

    /// Write the structured form. Defaults are written explicitly except
    /// for an empty shard, which is omitted.
    pub fn serialize(&self, material: &Material) -> Value {
        let mut json = JsonObject::new();
        json.insert("id".to_string(), Value::from(material.id.to_string()));
        json.insert("craftable".to_string(), Value::from(material.craftable));
        json.insert("fluid".to_string(), Value::from(material.fluid.id().to_string()));
        if !material.shard.is_empty() {
            let mut shard = JsonObject::new();
            shard.insert("item".to_string(), Value::from(material.shard.item().to_string()));
            shard.insert("count".to_string(), Value::from(material.shard.count()));
            json.insert("shard".to_string(), Value::Object(shard));
        }
        Value::Object(json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fluid::FluidTable;

    fn id(s: &str) -> ResourceId {
        ResourceId::parse(s).unwrap()
    }

    #[test]
    fn defaults_apply() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let material = loader.deserialize(&json!({ "id": "stone" })).unwrap();
        assert_eq!(material.id(), &id("hookforge:stone"));
        assert!(!material.is_craftable());
        assert!(material.fluid().is_empty());
        assert!(material.shard().is_empty());
    }

    #[test]
    fn full_definition() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let material = loader
            .deserialize(&json!({
                "id": "iron",
                "craftable": true,
                "fluid": "lava",
                "shard": { "item": "iron_shard", "count": 2 }
            }))
            .unwrap();
        assert!(material.is_craftable());
        assert_eq!(material.fluid().id(), &id("lava"));
        assert_eq!(material.shard(), &ItemStack::new(id("iron_shard"), 2));
    }

    #[test]
    fn unknown_fluid_falls_back_to_empty() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let material = loader
            .deserialize(&json!({ "id": "gold", "fluid": "molten_gold" }))
            .unwrap();
        assert!(material.fluid().is_empty());
    }

    #[test]
    fn bad_definitions_rejected() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        for bad in [
            json!({}),
            json!({ "id": "Bad Id" }),
            json!({ "id": "wood", "craftable": "yes" }),
            json!({ "id": "wood", "colour": "brown" }),
        ] {
            assert!(loader.deserialize(&bad).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn list_reports_index() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let err = loader
            .parse_list(r#"[{ "id": "wood" }, { "craftable": true }]"#)
            .unwrap_err();
        assert!(err.to_string().contains("materials[1]"));
        assert!(loader.parse_list(r#"{ "id": "wood" }"#).is_err());
    }

    #[test]
    fn serialize_round_trip() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let material = Material::new(
            id("wood"),
            true,
            Fluid::new(id("water")),
            ItemStack::new(id("wood_shard"), 1),
        );
        let json = loader.serialize(&material);
        assert_eq!(
            json,
            json!({
                "id": "hookforge:wood",
                "craftable": true,
                "fluid": "hookforge:water",
                "shard": { "item": "hookforge:wood_shard", "count": 1 }
            })
        );
        assert_eq!(loader.deserialize(&json).unwrap(), material);
    }

    #[test]
    fn zero_count_shard_survives_reload() {
        let fluids = FluidTable::with_defaults();
        let loader = MaterialLoader::new(&fluids);
        let material = loader
            .deserialize(&json!({ "id": "wood", "shard": { "item": "wood_shard", "count": 0 } }))
            .unwrap();
        assert!(material.shard().is_empty());
        let reloaded = loader.deserialize(&loader.serialize(&material)).unwrap();
        assert_eq!(reloaded, material);
    }
}
