//! Modifier modules: small behaviour units a modifier is composed from.
//!
//! Each module type has a [`ModuleLoader`] that knows its JSON and wire
//! forms. The [`ModuleRegistry`] resolves the `type` a definition declares
//! to that loader.

pub mod level;
pub mod name;
pub mod stat;

pub use level::EffectiveLevelModule;
pub use name::NameFormatModule;
pub use stat::StatBoostModule;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hf_core::{
    ContentError, ContentResult, DecodeResult, JsonObject, PacketReader, PacketWriter, ResourceId,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::hook::{AnyHook, DisplayNameHook, EffectiveLevelHook, ToolStatsHook};

/// A behaviour unit within a modifier.
///
/// The `as_*` accessors are how a module declares which hooks it can serve;
/// each defaults to `None`.
pub trait ModifierModule: Send + Sync + fmt::Debug {
    /// Canonical id of this module's loader, e.g. `hookforge:stat_boost`.
    fn loader_id(&self) -> &'static str;

    /// Hooks bound when a definition does not list any.
    fn default_hooks(&self) -> &'static [&'static dyn AnyHook] {
        &[]
    }

    /// The module's own JSON fields (without `type` and `hooks`).
    fn to_json(&self) -> JsonObject;

    /// Write the module's own wire payload.
    fn to_network(&self, writer: &mut PacketWriter);

    /// This module's display name implementation.
    fn as_display_name(&self) -> Option<&(dyn DisplayNameHook + 'static)> {
        None
    }

    /// This module's effective level implementation.
    fn as_effective_level(&self) -> Option<&(dyn EffectiveLevelHook + 'static)> {
        None
    }

    /// This module's tool stats implementation.
    fn as_tool_stats(&self) -> Option<&(dyn ToolStatsHook + 'static)> {
        None
    }
}

/// A module together with the hooks it is bound to.
#[derive(Clone)]
pub struct ModuleWithHooks {
    module: Arc<dyn ModifierModule>,
    hooks: Vec<&'static dyn AnyHook>,
}

impl ModuleWithHooks {
    /// Pair a module with hooks. Validity is checked when the modifier is built.
    pub fn new(module: Arc<dyn ModifierModule>, hooks: &[&'static dyn AnyHook]) -> Self {
        Self {
            module,
            hooks: hooks.to_vec(),
        }
    }

    /// Pair a module with its default hooks.
    pub fn with_default_hooks(module: Arc<dyn ModifierModule>) -> Self {
        let hooks = module.default_hooks().to_vec();
        Self { module, hooks }
    }

    /// The module.
    pub fn module(&self) -> &Arc<dyn ModifierModule> {
        &self.module
    }

    /// The hooks the module is bound to, in declared order.
    pub fn hooks(&self) -> &[&'static dyn AnyHook] {
        &self.hooks
    }

    /// Names of the bound hooks, in declared order.
    pub fn hook_names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl PartialEq for ModuleWithHooks {
    fn eq(&self, other: &Self) -> bool {
        self.module.loader_id() == other.module.loader_id()
            && self.module.to_json() == other.module.to_json()
            && self.hook_names() == other.hook_names()
    }
}

impl fmt::Debug for ModuleWithHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleWithHooks")
            .field("module", &self.module)
            .field("hooks", &self.hook_names())
            .finish()
    }
}

/// Decoders for one module type.
#[derive(Debug, Clone, Copy)]
pub struct ModuleLoader {
    /// Canonical type id, matching [`ModifierModule::loader_id`].
    pub id: &'static str,
    /// Build a module from its JSON fields.
    pub from_json: fn(&JsonObject) -> ContentResult<Arc<dyn ModifierModule>>,
    /// Build a module from its wire payload.
    pub from_network: fn(&mut PacketReader<'_>) -> DecodeResult<Arc<dyn ModifierModule>>,
}

/// Resolves declared module types to their loaders.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    loaders: HashMap<&'static str, ModuleLoader>,
}

impl ModuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// A registry holding the built-in module types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(name::LOADER);
        registry.register(level::LOADER);
        registry.register(stat::LOADER);
        registry
    }

    /// Add a loader, replacing any previous loader with the same id.
    pub fn register(&mut self, loader: ModuleLoader) {
        self.loaders.insert(loader.id, loader);
    }

    /// Look up a loader. Bare names resolve in the default namespace.
    pub fn get(&self, name: &str) -> Option<&ModuleLoader> {
        let canonical = ResourceId::parse(name).ok()?.to_string();
        self.loaders.get(canonical.as_str())
    }

    /// Ids of all registered module types, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.loaders.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Deserialize a module's own fields. The `type` and `hooks` keys belong to
/// the modifier loader and are skipped; any other unknown key is an error
/// when the module denies unknown fields.
pub(crate) fn parse_fields<T: DeserializeOwned>(json: &JsonObject) -> ContentResult<T> {
    let fields: JsonObject = json
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "type" | "hooks"))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// Reject values that overflowed `f32` or are otherwise not finite.
pub(crate) fn check_finite(key: &str, value: f32) -> ContentResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ContentError::syntax(format!("{key} must be a finite number")))
    }
}
