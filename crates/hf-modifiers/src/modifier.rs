//! The composed modifier.
//!
//! A [`ComposableModifier`] has no override points of its own. Everything it
//! does beyond naming and visibility comes from the modules bound in its
//! [`HookMap`], which is fixed at construction. Instances are immutable and
//! can be shared across threads behind an `Arc`.

use hf_core::ValidationError;

use crate::builder::ModifierBuilder;
use crate::display::{LevelDisplay, TooltipDisplay};
use crate::hook::{DISPLAY_NAME, EFFECTIVE_LEVEL, ModifierHook, TOOL_STATS};
use crate::hook_map::HookMap;
use crate::module::ModuleWithHooks;
use crate::tool::{StatsBuilder, ToolContext};

/// Priority used when a definition does not set one.
pub const DEFAULT_PRIORITY: i32 = 100;

/// A modifier composed from an ordered list of modules.
#[derive(Debug, Clone)]
pub struct ComposableModifier {
    level_display: LevelDisplay,
    tooltip_display: TooltipDisplay,
    priority: i32,
    modules: Vec<ModuleWithHooks>,
    hooks: HookMap,
}

impl ComposableModifier {
    /// Start building a modifier in code.
    pub fn builder() -> ModifierBuilder {
        ModifierBuilder::new()
    }

    /// Validate the modules and build the hook map.
    ///
    /// Every construction path funnels through here; callers translate the
    /// error into their own family.
    pub(crate) fn new(
        level_display: LevelDisplay,
        tooltip_display: TooltipDisplay,
        priority: i32,
        modules: Vec<ModuleWithHooks>,
    ) -> Result<Self, ValidationError> {
        let hooks = HookMap::build(&modules)?;
        Ok(Self {
            level_display,
            tooltip_display,
            priority,
            modules,
            hooks,
        })
    }

    /// How the level is shown next to the name.
    pub fn level_display(&self) -> LevelDisplay {
        self.level_display
    }

    /// When the modifier appears in tooltips.
    pub fn tooltip_display(&self) -> TooltipDisplay {
        self.tooltip_display
    }

    /// Ordering among modifiers on the same tool; higher runs first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The modules, in declared order.
    pub fn modules(&self) -> &[ModuleWithHooks] {
        &self.modules
    }

    /// The dispatch table.
    pub fn hook_map(&self) -> &HookMap {
        &self.hooks
    }

    /// Implementations of `hook`, in declared module order.
    pub fn hook<'a, H: ?Sized + 'static>(
        &'a self,
        hook: &ModifierHook<H>,
    ) -> impl Iterator<Item = &'a H> + use<'a, H> {
        self.hooks.registrants(hook)
    }

    /// Name with the level formatted, independent of any tool.
    pub fn base_name(&self, name: &str, level: u32) -> String {
        self.level_display.name_for_level(name, level)
    }

    /// Name as shown on `tool`: the base name passed through every
    /// display name registrant in order.
    pub fn display_name(&self, tool: &ToolContext, name: &str, level: u32) -> String {
        self.hook(&DISPLAY_NAME)
            .fold(self.base_name(name, level), |current, hook| {
                hook.display_name(tool, self, level, current)
            })
    }

    /// Level the modifier behaves as on `tool`. Without a registrant this is
    /// the raw level.
    pub fn effective_level(&self, tool: &ToolContext, level: u32) -> f32 {
        match self.hook(&EFFECTIVE_LEVEL).next() {
            Some(hook) => hook.effective_level(tool, self, level),
            None => level as f32,
        }
    }

    /// Let every tool stats registrant contribute, in order.
    pub fn add_tool_stats(&self, tool: &ToolContext, level: u32, stats: &mut StatsBuilder) {
        for hook in self.hook(&TOOL_STATS) {
            hook.add_tool_stats(tool, self, level, stats);
        }
    }

    /// Whether to list the modifier in a basic or advanced tooltip.
    pub fn should_display(&self, advanced: bool) -> bool {
        self.tooltip_display.should_display(advanced)
    }
}

/// Equal when every modeled field matches; the hook map is derived.
impl PartialEq for ComposableModifier {
    fn eq(&self, other: &Self) -> bool {
        self.level_display == other.level_display
            && self.tooltip_display == other.tooltip_display
            && self.priority == other.priority
            && self.modules == other.modules
    }
}
