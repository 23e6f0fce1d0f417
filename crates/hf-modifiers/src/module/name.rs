//! Wraps the display name in a fixed prefix and suffix.

use std::sync::Arc;

use hf_core::{ContentResult, DecodeResult, JsonObject, PacketReader, PacketWriter};
use serde::Deserialize;
use serde_json::Value;

use crate::hook::{AnyHook, DISPLAY_NAME, DisplayNameHook};
use crate::modifier::ComposableModifier;
use crate::module::{ModifierModule, ModuleLoader, parse_fields};
use crate::tool::ToolContext;

static DEFAULT_HOOKS: [&dyn AnyHook; 1] = [&DISPLAY_NAME];

/// Loader for [`NameFormatModule`].
pub const LOADER: ModuleLoader = ModuleLoader {
    id: "hookforge:name_format",
    from_json,
    from_network,
};

/// Produces `prefix + name + suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NameFormatModule {
    /// Text placed before the name.
    #[serde(default)]
    pub prefix: String,
    /// Text placed after the name.
    #[serde(default)]
    pub suffix: String,
}

impl NameFormatModule {
    /// Create a module with the given prefix and suffix.
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl ModifierModule for NameFormatModule {
    fn loader_id(&self) -> &'static str {
        LOADER.id
    }

    fn default_hooks(&self) -> &'static [&'static dyn AnyHook] {
        &DEFAULT_HOOKS
    }

    fn to_json(&self) -> JsonObject {
        let mut json = JsonObject::new();
        json.insert("prefix".to_string(), Value::from(self.prefix.as_str()));
        json.insert("suffix".to_string(), Value::from(self.suffix.as_str()));
        json
    }

    fn to_network(&self, writer: &mut PacketWriter) {
        writer.write_string(&self.prefix);
        writer.write_string(&self.suffix);
    }

    fn as_display_name(&self) -> Option<&(dyn DisplayNameHook + 'static)> {
        Some(self)
    }
}

impl DisplayNameHook for NameFormatModule {
    fn display_name(
        &self,
        _tool: &ToolContext,
        _modifier: &ComposableModifier,
        _level: u32,
        name: String,
    ) -> String {
        format!("{}{name}{}", self.prefix, self.suffix)
    }
}

fn from_json(json: &JsonObject) -> ContentResult<Arc<dyn ModifierModule>> {
    let module: NameFormatModule = parse_fields(json)?;
    Ok(Arc::new(module))
}

fn from_network(reader: &mut PacketReader<'_>) -> DecodeResult<Arc<dyn ModifierModule>> {
    let prefix = reader.read_string()?;
    let suffix = reader.read_string()?;
    Ok(Arc::new(NameFormatModule { prefix, suffix }))
}
