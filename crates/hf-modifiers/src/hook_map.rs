//! The per-modifier dispatch table from hook to registered modules.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use hf_core::ValidationError;

use crate::hook::{AnyHook, MergePolicy, ModifierHook};
use crate::module::{ModifierModule, ModuleWithHooks};

/// Hook name → modules implementing it, in declared module order.
///
/// Built once from a module list and never mutated.
#[derive(Clone, Default)]
pub struct HookMap {
    entries: HashMap<&'static str, Vec<Arc<dyn ModifierModule>>>,
}

impl HookMap {
    /// Validate the module list and build the map in a single pass.
    pub fn build(modules: &[ModuleWithHooks]) -> Result<Self, ValidationError> {
        let mut entries: HashMap<&'static str, Vec<Arc<dyn ModifierModule>>> = HashMap::new();

        for entry in modules {
            let module = entry.module();
            let mut seen = HashSet::new();
            for &hook in entry.hooks() {
                if !seen.insert(hook.name()) {
                    return Err(ValidationError::DuplicateHook {
                        module: module.loader_id().to_string(),
                        hook: hook.name().to_string(),
                    });
                }
                if !hook.supports(module.as_ref()) {
                    return Err(ValidationError::UnsupportedHook {
                        module: module.loader_id().to_string(),
                        hook: hook.name().to_string(),
                    });
                }
                let registrants = entries.entry(hook.name()).or_default();
                registrants.push(Arc::clone(module));
                if hook.policy() == MergePolicy::Exclusive && registrants.len() > 1 {
                    return Err(conflict(hook, registrants.len()));
                }
            }
        }

        Ok(Self { entries })
    }

    /// Implementations of `hook`, in declared module order.
    pub fn registrants<'a, H: ?Sized + 'static>(
        &'a self,
        hook: &ModifierHook<H>,
    ) -> impl Iterator<Item = &'a H> + use<'a, H> {
        let cast = hook.cast_fn();
        self.entries
            .get(hook.name())
            .into_iter()
            .flatten()
            .filter_map(move |module| cast(module.as_ref()))
    }

    /// Modules registered for the hook named `name`.
    pub fn modules_for(&self, name: &str) -> &[Arc<dyn ModifierModule>] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of hooks with at least one registrant, sorted.
    pub fn hook_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns true if no module registered any hook.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn conflict(hook: &dyn AnyHook, count: usize) -> ValidationError {
    ValidationError::ExclusiveConflict {
        hook: hook.name().to_string(),
        count,
    }
}

impl fmt::Debug for HookMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.hook_names() {
            let ids: Vec<_> = self.modules_for(name).iter().map(|m| m.loader_id()).collect();
            map.entry(&name, &ids);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::{DISPLAY_NAME, EFFECTIVE_LEVEL, TOOL_STATS};
    use crate::module::{EffectiveLevelModule, NameFormatModule, StatBoostModule};

    fn stat(name: &str) -> ModuleWithHooks {
        ModuleWithHooks::new(Arc::new(StatBoostModule::add(name, 1.0)), &[&TOOL_STATS])
    }

    #[test]
    fn empty_module_list() {
        let map = HookMap::build(&[]).unwrap();
        assert!(map.is_empty());
        assert_eq!(map.registrants(&TOOL_STATS).count(), 0);
    }

    #[test]
    fn order_follows_module_list() {
        let modules = vec![
            stat("a"),
            ModuleWithHooks::new(Arc::new(NameFormatModule::new("", "")), &[&DISPLAY_NAME]),
            stat("b"),
            stat("c"),
        ];
        let map = HookMap::build(&modules).unwrap();
        let ids: Vec<_> = map
            .modules_for(TOOL_STATS.name())
            .iter()
            .map(|m| m.to_json()["stat"].clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(map.registrants(&TOOL_STATS).count(), 3);
        assert_eq!(map.registrants(&DISPLAY_NAME).count(), 1);
        assert_eq!(
            map.hook_names(),
            vec!["hookforge:display_name", "hookforge:tool_stats"]
        );
    }

    #[test]
    fn module_without_hooks_is_inert() {
        let modules = vec![ModuleWithHooks::new(
            Arc::new(StatBoostModule::add("durability", 1.0)),
            &[],
        )];
        let map = HookMap::build(&modules).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn unsupported_hook_rejected() {
        let modules = vec![ModuleWithHooks::new(
            Arc::new(StatBoostModule::add("durability", 1.0)),
            &[&DISPLAY_NAME],
        )];
        assert_eq!(
            HookMap::build(&modules).unwrap_err(),
            ValidationError::UnsupportedHook {
                module: "hookforge:stat_boost".to_string(),
                hook: "hookforge:display_name".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_hook_rejected() {
        let modules = vec![ModuleWithHooks::new(
            Arc::new(StatBoostModule::add("durability", 1.0)),
            &[&TOOL_STATS, &TOOL_STATS],
        )];
        assert!(matches!(
            HookMap::build(&modules),
            Err(ValidationError::DuplicateHook { .. })
        ));
    }

    #[test]
    fn exclusive_hook_accepts_one_module() {
        let level = || {
            ModuleWithHooks::new(
                Arc::new(EffectiveLevelModule::new(2.0, 0.0)),
                &[&EFFECTIVE_LEVEL],
            )
        };
        assert!(HookMap::build(&[level()]).is_ok());
        assert_eq!(
            HookMap::build(&[level(), level()]).unwrap_err(),
            ValidationError::ExclusiveConflict {
                hook: "hookforge:effective_level".to_string(),
                count: 2,
            }
        );
    }
}
