//! JSON and wire codecs for [`ComposableModifier`].
//!
//! ## Structured form
//! ```text
//! { "level_display": { "type": "default" },
//!   "tooltip_display": "always",          // optional
//!   "priority": 100,                      // optional
//!   "modules": [ { "type": "hookforge:stat_boost",
//!                  "hooks": ["hookforge:tool_stats"],   // optional
//!                  ...module fields } ] }
//! ```
//!
//! ## Wire form
//! ```text
//! string levelDisplay; i32 tooltipDisplay; i32 priority;
//! varint moduleCount; moduleCount x { string type; payload;
//!                                     varint hookCount; hookCount x string hook }
//! ```

use serde_json::Value;
use tracing::{debug, warn};

use hf_core::json::{self, JsonObject};
use hf_core::{
    ContentError, ContentResult, DecodeError, DecodeResult, PacketReader, PacketWriter, ResourceId,
    WireLimits,
};

use crate::display::{LevelDisplay, TooltipDisplay};
use crate::hook::HookRegistry;
use crate::modifier::{ComposableModifier, DEFAULT_PRIORITY};
use crate::module::{ModuleRegistry, ModuleWithHooks};

/// Outcome of loading a batch of definitions.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Definitions that loaded, in input order.
    pub loaded: Vec<(ResourceId, ComposableModifier)>,
    /// Definitions that failed, in input order.
    pub failed: Vec<(ResourceId, ContentError)>,
}

/// Reads and writes modifiers using the module and hook registries.
#[derive(Debug, Clone, Default)]
pub struct ModifierLoader {
    modules: ModuleRegistry,
    hooks: HookRegistry,
    limits: WireLimits,
}

impl ModifierLoader {
    /// A loader over explicit registries.
    pub fn new(modules: ModuleRegistry, hooks: HookRegistry) -> Self {
        Self {
            modules,
            hooks,
            limits: WireLimits::default(),
        }
    }

    /// Set the limits applied by [`read_bytes`](Self::read_bytes).
    pub fn with_limits(mut self, limits: WireLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The module registry.
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// The hook registry.
    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// The configured wire limits.
    pub fn limits(&self) -> WireLimits {
        self.limits
    }

    // -----------------------------------------------------------------------
    // Structured form
    // -----------------------------------------------------------------------

    /// Parse JSON text into a modifier.
    pub fn parse(&self, text: &str) -> ContentResult<ComposableModifier> {
        let value: Value = serde_json::from_str(text)?;
        self.deserialize(&value)
    }

    /// Read the structured form.
    pub fn deserialize(&self, value: &Value) -> ContentResult<ComposableModifier> {
        let json = json::as_object(value, "modifier")?;
        let level_display = LevelDisplay::from_json(json::get_object(json, "level_display")?)?;
        let tooltip_name = json::get_str_or(json, "tooltip_display", "always")?;
        let tooltip_display = TooltipDisplay::parse(tooltip_name).ok_or_else(|| {
            ContentError::syntax(format!("unknown tooltip_display \"{tooltip_name}\""))
        })?;
        let priority = json::get_i32_or(json, "priority", DEFAULT_PRIORITY)?;
        let modules = json::parse_list(json, "modules", |v| self.module_from_json(v))?;

        ComposableModifier::new(level_display, tooltip_display, priority, modules)
            .map_err(ContentError::Invalid)
    }

    fn module_from_json(&self, value: &Value) -> ContentResult<ModuleWithHooks> {
        let json = json::as_object(value, "module")?;
        let type_name = json::get_str(json, "type")?;
        let loader = self
            .modules
            .get(type_name)
            .ok_or_else(|| ContentError::syntax(format!("unknown module type \"{type_name}\"")))?;
        let module = (loader.from_json)(json)?;

        if !json.contains_key("hooks") {
            return Ok(ModuleWithHooks::with_default_hooks(module));
        }
        let hooks = json::parse_list(json, "hooks", |v| {
            let name = v
                .as_str()
                .ok_or_else(|| ContentError::syntax(format!("expected hook name, found {v}")))?;
            Ok(self.hooks.resolve(name)?)
        })?;
        Ok(ModuleWithHooks::new(module, &hooks))
    }

    /// Write the structured form. Every field is written explicitly.
    pub fn serialize(&self, modifier: &ComposableModifier) -> Value {
        let mut json = JsonObject::new();
        json.insert("level_display".to_string(), modifier.level_display().to_json());
        json.insert(
            "tooltip_display".to_string(),
            Value::from(modifier.tooltip_display().name()),
        );
        json.insert("priority".to_string(), Value::from(modifier.priority()));
        let modules = modifier.modules().iter().map(module_to_json).collect();
        json.insert("modules".to_string(), Value::Array(modules));
        Value::Object(json)
    }

    /// Load a batch of definitions. A failing definition is reported and
    /// skipped; the rest still load.
    pub fn load_all<I>(&self, definitions: I) -> LoadReport
    where
        I: IntoIterator<Item = (ResourceId, Value)>,
    {
        let mut report = LoadReport::default();
        for (id, value) in definitions {
            match self.deserialize(&value) {
                Ok(modifier) => report.loaded.push((id, modifier)),
                Err(e) => {
                    warn!(modifier = %id, error = %e, "skipping modifier definition");
                    report.failed.push((id, e));
                }
            }
        }
        debug!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "loaded modifier definitions"
        );
        report
    }

    // -----------------------------------------------------------------------
    // Wire form
    // -----------------------------------------------------------------------

    /// Read the wire form.
    pub fn read_modifier(&self, reader: &mut PacketReader<'_>) -> DecodeResult<ComposableModifier> {
        let level_display = LevelDisplay::from_network(reader)?;
        let tooltip_display = TooltipDisplay::from_network(reader)?;
        let priority = reader.read_i32()?;
        let count = reader.read_var_len("module")?;
        let mut modules = Vec::with_capacity(count);
        for _ in 0..count {
            modules.push(self.module_from_network(reader)?);
        }

        ComposableModifier::new(level_display, tooltip_display, priority, modules)
            .map_err(DecodeError::Invalid)
    }

    fn module_from_network(&self, reader: &mut PacketReader<'_>) -> DecodeResult<ModuleWithHooks> {
        let type_name = reader.read_string()?;
        let loader = self.modules.get(&type_name).ok_or(DecodeError::UnknownType {
            what: "module",
            name: type_name,
        })?;
        let module = (loader.from_network)(reader)?;
        let count = reader.read_var_len("hook")?;
        let mut hooks = Vec::with_capacity(count);
        for _ in 0..count {
            let name = reader.read_string()?;
            hooks.push(self.hooks.resolve(&name)?);
        }
        Ok(ModuleWithHooks::new(module, &hooks))
    }

    /// Write the wire form.
    pub fn write_modifier(&self, modifier: &ComposableModifier, writer: &mut PacketWriter) {
        modifier.level_display().to_network(writer);
        modifier.tooltip_display().to_network(writer);
        writer.write_i32(modifier.priority());
        writer.write_var_len(modifier.modules().len());
        for entry in modifier.modules() {
            writer.write_string(entry.module().loader_id());
            entry.module().to_network(writer);
            writer.write_var_len(entry.hooks().len());
            for hook in entry.hooks() {
                writer.write_string(hook.name());
            }
        }
    }

    /// Decode a standalone wire-form modifier, rejecting trailing bytes.
    pub fn read_bytes(&self, bytes: &[u8]) -> DecodeResult<ComposableModifier> {
        let mut reader = PacketReader::with_limits(bytes, self.limits);
        let modifier = self.read_modifier(&mut reader)?;
        reader.finish()?;
        Ok(modifier)
    }

    /// Encode a standalone wire-form modifier.
    pub fn write_bytes(&self, modifier: &ComposableModifier) -> Vec<u8> {
        let mut writer = PacketWriter::new();
        self.write_modifier(modifier, &mut writer);
        writer.freeze().to_vec()
    }
}

fn module_to_json(entry: &ModuleWithHooks) -> Value {
    let mut json = entry.module().to_json();
    json.insert("type".to_string(), Value::from(entry.module().loader_id()));
    let hooks = entry.hook_names().into_iter().map(Value::from).collect();
    json.insert("hooks".to_string(), Value::Array(hooks));
    Value::Object(json)
}
