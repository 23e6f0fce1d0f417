//! Typed hook identities and the hook registry.
//!
//! A [`ModifierHook<H>`] names a capability trait `H` and declares how the
//! results of several registrants are combined. Modules opt in to a hook by
//! returning `Some(self)` from the matching `as_*` accessor on
//! [`ModifierModule`]; declaring a hook a module does not implement fails
//! construction.

use std::collections::HashMap;
use std::fmt;

use hf_core::{ResourceId, ValidationError};

use crate::modifier::ComposableModifier;
use crate::module::ModifierModule;
use crate::tool::{StatsBuilder, ToolContext};

/// How the registrants of one hook are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// At most one module may register; without one the caller's default applies.
    Exclusive,
    /// Registrants run in order, each receiving the previous result.
    Chain,
    /// Every registrant runs in order against a shared accumulator.
    Accumulate,
}

/// A typed hook identity.
///
/// `H` is the hook's callback trait object type. The `cast` function is the
/// structural check: it returns the module's implementation of `H`, if any.
pub struct ModifierHook<H: ?Sized + 'static> {
    name: &'static str,
    policy: MergePolicy,
    cast: fn(&dyn ModifierModule) -> Option<&H>,
}

impl<H: ?Sized + 'static> ModifierHook<H> {
    /// Declare a hook. `name` must be a canonical `namespace:path` id.
    pub const fn new(
        name: &'static str,
        policy: MergePolicy,
        cast: fn(&dyn ModifierModule) -> Option<&H>,
    ) -> Self {
        Self { name, policy, cast }
    }

    /// The hook's canonical name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The hook's merge policy.
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// The module's implementation of this hook, if it has one.
    pub fn cast<'a>(&self, module: &'a dyn ModifierModule) -> Option<&'a H> {
        (self.cast)(module)
    }

    pub(crate) fn cast_fn(&self) -> fn(&dyn ModifierModule) -> Option<&H> {
        self.cast
    }
}

impl<H: ?Sized + 'static> fmt::Debug for ModifierHook<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierHook")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .finish()
    }
}

/// A hook identity with its callback type erased.
///
/// This is what module declarations and the [`HookRegistry`] hold.
pub trait AnyHook: Send + Sync {
    /// The hook's canonical name.
    fn name(&self) -> &'static str;

    /// The hook's merge policy.
    fn policy(&self) -> MergePolicy;

    /// Returns true if `module` implements this hook.
    fn supports(&self, module: &dyn ModifierModule) -> bool;
}

impl<H: ?Sized + 'static> AnyHook for ModifierHook<H> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn policy(&self) -> MergePolicy {
        self.policy
    }

    fn supports(&self, module: &dyn ModifierModule) -> bool {
        self.cast(module).is_some()
    }
}

impl fmt::Debug for dyn AnyHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Built-in hook traits
// ---------------------------------------------------------------------------

/// Adjusts the name shown for a modifier on a tool.
pub trait DisplayNameHook: Send + Sync {
    /// Return the new name given the name produced so far.
    fn display_name(
        &self,
        tool: &ToolContext,
        modifier: &ComposableModifier,
        level: u32,
        name: String,
    ) -> String;
}

/// Computes the level a modifier behaves as on a tool.
pub trait EffectiveLevelHook: Send + Sync {
    /// Return the effective level for the raw `level`.
    fn effective_level(&self, tool: &ToolContext, modifier: &ComposableModifier, level: u32) -> f32;
}

/// Contributes to a tool's stats.
pub trait ToolStatsHook: Send + Sync {
    /// Add this module's contribution to `stats`.
    fn add_tool_stats(
        &self,
        tool: &ToolContext,
        modifier: &ComposableModifier,
        level: u32,
        stats: &mut StatsBuilder,
    );
}

fn cast_display_name(module: &dyn ModifierModule) -> Option<&(dyn DisplayNameHook + 'static)> {
    module.as_display_name()
}

fn cast_effective_level(
    module: &dyn ModifierModule,
) -> Option<&(dyn EffectiveLevelHook + 'static)> {
    module.as_effective_level()
}

fn cast_tool_stats(module: &dyn ModifierModule) -> Option<&(dyn ToolStatsHook + 'static)> {
    module.as_tool_stats()
}

/// Display name hook. Chained, seeded with the level-display name.
pub static DISPLAY_NAME: ModifierHook<dyn DisplayNameHook> =
    ModifierHook::new("hookforge:display_name", MergePolicy::Chain, cast_display_name);

/// Effective level hook. Exclusive, defaults to the raw level.
pub static EFFECTIVE_LEVEL: ModifierHook<dyn EffectiveLevelHook> = ModifierHook::new(
    "hookforge:effective_level",
    MergePolicy::Exclusive,
    cast_effective_level,
);

/// Tool stats hook. Every registrant contributes.
pub static TOOL_STATS: ModifierHook<dyn ToolStatsHook> =
    ModifierHook::new("hookforge:tool_stats", MergePolicy::Accumulate, cast_tool_stats);

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Resolves hook names found in content or on the wire to hook identities.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: HashMap<&'static str, &'static dyn AnyHook>,
}

impl HookRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// A registry holding the built-in hooks.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(&DISPLAY_NAME);
        registry.register(&EFFECTIVE_LEVEL);
        registry.register(&TOOL_STATS);
        registry
    }

    /// Add a hook, replacing any previous hook with the same name.
    pub fn register(&mut self, hook: &'static dyn AnyHook) {
        self.hooks.insert(hook.name(), hook);
    }

    /// Look up a hook by name. Bare names resolve in the default namespace.
    pub fn resolve(&self, name: &str) -> Result<&'static dyn AnyHook, ValidationError> {
        let canonical = ResourceId::parse(name)
            .map_err(|_| ValidationError::UnknownHook(name.to_string()))?
            .to_string();
        self.hooks
            .get(canonical.as_str())
            .copied()
            .ok_or_else(|| ValidationError::UnknownHook(name.to_string()))
    }

    /// Names of all registered hooks, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.hooks.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{NameFormatModule, StatBoostModule};

    #[test]
    fn defaults_are_registered() {
        let registry = HookRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "hookforge:display_name",
                "hookforge:effective_level",
                "hookforge:tool_stats"
            ]
        );
    }

    #[test]
    fn resolve_accepts_bare_names() {
        let registry = HookRegistry::with_defaults();
        let hook = registry.resolve("tool_stats").unwrap();
        assert_eq!(hook.name(), "hookforge:tool_stats");
        assert_eq!(hook.policy(), MergePolicy::Accumulate);
    }

    #[test]
    fn resolve_unknown_hook() {
        let registry = HookRegistry::with_defaults();
        assert_eq!(
            registry.resolve("hookforge:on_attack").unwrap_err(),
            ValidationError::UnknownHook("hookforge:on_attack".to_string())
        );
        assert!(registry.resolve("Not A Hook").is_err());
    }

    #[test]
    fn supports_checks_structure() {
        let name = NameFormatModule::new("", "+");
        let stat = StatBoostModule::add("durability", 10.0);
        assert!(DISPLAY_NAME.supports(&name));
        assert!(!DISPLAY_NAME.supports(&stat));
        assert!(TOOL_STATS.supports(&stat));
        assert!(!EFFECTIVE_LEVEL.supports(&stat));
    }

    #[test]
    fn custom_hooks_can_be_registered() {
        static MARKER: ModifierHook<dyn ToolStatsHook> =
            ModifierHook::new("example:marker", MergePolicy::Accumulate, cast_tool_stats);
        let mut registry = HookRegistry::with_defaults();
        registry.register(&MARKER);
        assert_eq!(registry.resolve("example:marker").unwrap().name(), "example:marker");
    }
}
