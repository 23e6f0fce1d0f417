//! Boosts a single tool stat per modifier level.

use std::sync::Arc;

use hf_core::{ContentResult, DecodeResult, JsonObject, PacketReader, PacketWriter};
use serde::Deserialize;
use serde_json::Value;

use crate::hook::{AnyHook, TOOL_STATS, ToolStatsHook};
use crate::modifier::ComposableModifier;
use crate::module::{ModifierModule, ModuleLoader, check_finite, parse_fields};
use crate::tool::{StatsBuilder, ToolContext};

static DEFAULT_HOOKS: [&dyn AnyHook; 1] = [&TOOL_STATS];

/// Loader for [`StatBoostModule`].
pub const LOADER: ModuleLoader = ModuleLoader {
    id: "hookforge:stat_boost",
    from_json,
    from_network,
};

/// Adds `per_level * level` to a stat, or multiplies it by
/// `1 + per_level * level` when `multiply` is set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatBoostModule {
    /// Name of the stat to change.
    pub stat: String,
    /// Amount per modifier level.
    pub per_level: f32,
    /// Scale the stat instead of adding to it.
    #[serde(default)]
    pub multiply: bool,
}

impl StatBoostModule {
    /// Add `per_level` to `stat` for each level.
    pub fn add(stat: impl Into<String>, per_level: f32) -> Self {
        Self {
            stat: stat.into(),
            per_level,
            multiply: false,
        }
    }

    /// Scale `stat` by `per_level` for each level.
    pub fn scale(stat: impl Into<String>, per_level: f32) -> Self {
        Self {
            stat: stat.into(),
            per_level,
            multiply: true,
        }
    }
}

impl ModifierModule for StatBoostModule {
    fn loader_id(&self) -> &'static str {
        LOADER.id
    }

    fn default_hooks(&self) -> &'static [&'static dyn AnyHook] {
        &DEFAULT_HOOKS
    }

    fn to_json(&self) -> JsonObject {
        let mut json = JsonObject::new();
        json.insert("stat".to_string(), Value::from(self.stat.as_str()));
        json.insert("per_level".to_string(), Value::from(f64::from(self.per_level)));
        json.insert("multiply".to_string(), Value::from(self.multiply));
        json
    }

    fn to_network(&self, writer: &mut PacketWriter) {
        writer.write_string(&self.stat);
        writer.write_f32(self.per_level);
        writer.write_bool(self.multiply);
    }

    fn as_tool_stats(&self) -> Option<&(dyn ToolStatsHook + 'static)> {
        Some(self)
    }
}

impl ToolStatsHook for StatBoostModule {
    fn add_tool_stats(
        &self,
        _tool: &ToolContext,
        _modifier: &ComposableModifier,
        level: u32,
        stats: &mut StatsBuilder,
    ) {
        let amount = self.per_level * level as f32;
        if self.multiply {
            stats.multiply(&self.stat, 1.0 + amount);
        } else {
            stats.add(&self.stat, amount);
        }
    }
}

fn from_json(json: &JsonObject) -> ContentResult<Arc<dyn ModifierModule>> {
    let module: StatBoostModule = parse_fields(json)?;
    check_finite("per_level", module.per_level)?;
    Ok(Arc::new(module))
}

fn from_network(reader: &mut PacketReader<'_>) -> DecodeResult<Arc<dyn ModifierModule>> {
    let stat = reader.read_string()?;
    let per_level = reader.read_finite_f32("per_level")?;
    let multiply = reader.read_bool()?;
    Ok(Arc::new(StatBoostModule {
        stat,
        per_level,
        multiply,
    }))
}
