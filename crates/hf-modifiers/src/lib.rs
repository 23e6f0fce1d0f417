//! Composable modifiers for Hookforge.
//!
//! A [`ComposableModifier`] carries no behavior of its own. It holds an
//! ordered list of modules, each bound to the typed hooks it answers, and
//! dispatches every hook to its registrants through a [`HookMap`] built once
//! at construction. Modifiers are authored as JSON and synced to clients in a
//! positional binary form; [`ModifierLoader`] handles both.

/// Fluent construction in code.
pub mod builder;
/// Level formatting and tooltip visibility.
pub mod display;
/// Typed hooks, merge policies, and the hook registry.
pub mod hook;
/// Per-modifier hook dispatch table.
pub mod hook_map;
/// JSON and wire codecs for whole modifiers.
pub mod loader;
/// The composed modifier.
pub mod modifier;
/// Modules and their loaders.
pub mod module;
/// Client-side store of synced modifiers.
pub mod registry;
/// Tool state seen by hooks.
pub mod tool;

/// Re-export the builder.
pub use builder::ModifierBuilder;
/// Re-export display policies.
pub use display::{LevelDisplay, MAX_PLUSES_LEVEL, TooltipDisplay};
/// Re-export hook types.
pub use hook::{
    AnyHook, DISPLAY_NAME, DisplayNameHook, EFFECTIVE_LEVEL, EffectiveLevelHook, HookRegistry,
    MergePolicy, ModifierHook, TOOL_STATS, ToolStatsHook,
};
/// Re-export the dispatch table.
pub use hook_map::HookMap;
/// Re-export codec types.
pub use loader::{LoadReport, ModifierLoader};
/// Re-export the modifier.
pub use modifier::{ComposableModifier, DEFAULT_PRIORITY};
/// Re-export module types.
pub use module::{
    EffectiveLevelModule, ModifierModule, ModuleLoader, ModuleRegistry, ModuleWithHooks,
    NameFormatModule, StatBoostModule,
};
/// Re-export registry types.
pub use registry::{ModifierRegistry, ModifierSink};
/// Re-export tool types.
pub use tool::{StatsBuilder, ToolContext};
