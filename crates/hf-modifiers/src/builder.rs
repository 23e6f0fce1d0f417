//! Fluent construction of modifiers in code.

use std::sync::Arc;

use hf_core::ValidationError;

use crate::display::{LevelDisplay, TooltipDisplay};
use crate::hook::AnyHook;
use crate::modifier::{ComposableModifier, DEFAULT_PRIORITY};
use crate::module::{ModifierModule, ModuleWithHooks};

/// Accumulates modules and settings, then validates them in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct ModifierBuilder {
    level_display: LevelDisplay,
    tooltip_display: TooltipDisplay,
    priority: i32,
    modules: Vec<ModuleWithHooks>,
}

impl Default for ModifierBuilder {
    fn default() -> Self {
        Self {
            level_display: LevelDisplay::Default,
            tooltip_display: TooltipDisplay::Always,
            priority: DEFAULT_PRIORITY,
            modules: Vec::new(),
        }
    }
}

impl ModifierBuilder {
    /// A builder with default settings and no modules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level display.
    pub fn level_display(mut self, level_display: LevelDisplay) -> Self {
        self.level_display = level_display;
        self
    }

    /// Set the tooltip display.
    pub fn tooltip_display(mut self, tooltip_display: TooltipDisplay) -> Self {
        self.tooltip_display = tooltip_display;
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Add a module bound to no hooks.
    pub fn add_module(self, module: impl ModifierModule + 'static) -> Self {
        self.add_module_with(module, &[])
    }

    /// Add a module bound to `hooks`.
    pub fn add_module_with(
        self,
        module: impl ModifierModule + 'static,
        hooks: &[&'static dyn AnyHook],
    ) -> Self {
        self.add_shared(Arc::new(module), hooks)
    }

    /// Add an already shared module bound to `hooks`.
    pub fn add_shared(mut self, module: Arc<dyn ModifierModule>, hooks: &[&'static dyn AnyHook]) -> Self {
        self.modules.push(ModuleWithHooks::new(module, hooks));
        self
    }

    /// Validate and build the modifier.
    pub fn build(self) -> Result<ComposableModifier, ValidationError> {
        ComposableModifier::new(
            self.level_display,
            self.tooltip_display,
            self.priority,
            self.modules,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::{DISPLAY_NAME, TOOL_STATS};
    use crate::module::{NameFormatModule, StatBoostModule};

    #[test]
    fn settings_are_applied() {
        let modifier = ModifierBuilder::new()
            .level_display(LevelDisplay::Pluses)
            .tooltip_display(TooltipDisplay::Never)
            .priority(-20)
            .build()
            .unwrap();
        assert_eq!(modifier.level_display(), LevelDisplay::Pluses);
        assert_eq!(modifier.tooltip_display(), TooltipDisplay::Never);
        assert_eq!(modifier.priority(), -20);
    }

    #[test]
    fn module_without_hooks_is_kept() {
        let modifier = ModifierBuilder::new()
            .add_module(NameFormatModule::new("", "?"))
            .build()
            .unwrap();
        assert_eq!(modifier.modules().len(), 1);
        assert!(modifier.modules()[0].hooks().is_empty());
        assert!(modifier.hook_map().is_empty());
    }

    #[test]
    fn several_hooks_on_one_module_need_support_for_each() {
        let err = ModifierBuilder::new()
            .add_module_with(StatBoostModule::add("durability", 1.0), &[&TOOL_STATS, &DISPLAY_NAME])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedHook {
                module: "hookforge:stat_boost".to_string(),
                hook: "hookforge:display_name".to_string(),
            }
        );
    }
}
