//! Scales the level a modifier behaves as.

use std::sync::Arc;

use hf_core::{ContentResult, DecodeResult, JsonObject, PacketReader, PacketWriter};
use serde::Deserialize;
use serde_json::Value;

use crate::hook::{AnyHook, EFFECTIVE_LEVEL, EffectiveLevelHook};
use crate::modifier::ComposableModifier;
use crate::module::{ModifierModule, ModuleLoader, check_finite, parse_fields};
use crate::tool::ToolContext;

static DEFAULT_HOOKS: [&dyn AnyHook; 1] = [&EFFECTIVE_LEVEL];

/// Loader for [`EffectiveLevelModule`].
pub const LOADER: ModuleLoader = ModuleLoader {
    id: "hookforge:effective_level",
    from_json,
    from_network,
};

fn one() -> f32 {
    1.0
}

/// Effective level is `level * multiplier + bonus`, or zero on a broken tool
/// when `broken_zero` is set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectiveLevelModule {
    /// Factor applied to the raw level.
    #[serde(default = "one")]
    pub multiplier: f32,
    /// Flat amount added after scaling.
    #[serde(default)]
    pub bonus: f32,
    /// Disable the modifier entirely while the tool is broken.
    #[serde(default)]
    pub broken_zero: bool,
}

impl EffectiveLevelModule {
    /// Scale by `multiplier` and add `bonus`.
    pub fn new(multiplier: f32, bonus: f32) -> Self {
        Self {
            multiplier,
            bonus,
            broken_zero: false,
        }
    }

    /// Also drop to zero while the tool is broken.
    pub fn zero_when_broken(mut self) -> Self {
        self.broken_zero = true;
        self
    }
}

impl ModifierModule for EffectiveLevelModule {
    fn loader_id(&self) -> &'static str {
        LOADER.id
    }

    fn default_hooks(&self) -> &'static [&'static dyn AnyHook] {
        &DEFAULT_HOOKS
    }

    fn to_json(&self) -> JsonObject {
        let mut json = JsonObject::new();
        json.insert("multiplier".to_string(), Value::from(f64::from(self.multiplier)));
        json.insert("bonus".to_string(), Value::from(f64::from(self.bonus)));
        json.insert("broken_zero".to_string(), Value::from(self.broken_zero));
        json
    }

    fn to_network(&self, writer: &mut PacketWriter) {
        writer.write_f32(self.multiplier);
        writer.write_f32(self.bonus);
        writer.write_bool(self.broken_zero);
    }

    fn as_effective_level(&self) -> Option<&(dyn EffectiveLevelHook + 'static)> {
        Some(self)
    }
}

impl EffectiveLevelHook for EffectiveLevelModule {
    fn effective_level(&self, tool: &ToolContext, _modifier: &ComposableModifier, level: u32) -> f32 {
        if self.broken_zero && tool.is_broken() {
            return 0.0;
        }
        level as f32 * self.multiplier + self.bonus
    }
}

fn from_json(json: &JsonObject) -> ContentResult<Arc<dyn ModifierModule>> {
    let module: EffectiveLevelModule = parse_fields(json)?;
    check_finite("multiplier", module.multiplier)?;
    check_finite("bonus", module.bonus)?;
    Ok(Arc::new(module))
}

fn from_network(reader: &mut PacketReader<'_>) -> DecodeResult<Arc<dyn ModifierModule>> {
    let multiplier = reader.read_finite_f32("multiplier")?;
    let bonus = reader.read_finite_f32("bonus")?;
    let broken_zero = reader.read_bool()?;
    Ok(Arc::new(EffectiveLevelModule {
        multiplier,
        bonus,
        broken_zero,
    }))
}
