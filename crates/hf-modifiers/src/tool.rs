//! The tool view modifiers are evaluated against, and the stats accumulator.

use std::collections::BTreeMap;

use hf_core::ResourceId;

/// Read-only view of the tool a modifier is evaluated on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    /// The tool's item id.
    pub item: ResourceId,
    /// Damage taken so far.
    pub damage: u32,
    /// Damage at which the tool breaks. Zero means unbreakable.
    pub max_damage: u32,
}

impl ToolContext {
    /// A fresh, undamaged tool.
    pub fn new(item: ResourceId, max_damage: u32) -> Self {
        Self {
            item,
            damage: 0,
            max_damage,
        }
    }

    /// Set the damage taken.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.damage = damage;
        self
    }

    /// Returns true if the tool has reached its maximum damage.
    pub fn is_broken(&self) -> bool {
        self.max_damage > 0 && self.damage >= self.max_damage
    }
}

/// Named float stats, built up by the tool stats hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsBuilder {
    values: BTreeMap<String, f32>,
}

impl StatsBuilder {
    /// An empty set of stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to a stat, starting from zero.
    pub fn add(&mut self, stat: &str, amount: f32) {
        *self.values.entry(stat.to_string()).or_insert(0.0) += amount;
    }

    /// Multiply a stat that is already present. Absent stats stay absent.
    pub fn multiply(&mut self, stat: &str, factor: f32) {
        if let Some(value) = self.values.get_mut(stat) {
            *value *= factor;
        }
    }

    /// Current value of a stat (zero if absent).
    pub fn get(&self, stat: &str) -> f32 {
        self.values.get(stat).copied().unwrap_or(0.0)
    }

    /// All stats in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns true if no stat has been touched.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickaxe() -> ToolContext {
        ToolContext::new(ResourceId::parse("hookforge:pickaxe").unwrap(), 100)
    }

    #[test]
    fn broken_at_max_damage() {
        assert!(!pickaxe().is_broken());
        assert!(!pickaxe().with_damage(99).is_broken());
        assert!(pickaxe().with_damage(100).is_broken());
    }

    #[test]
    fn unbreakable_never_broken() {
        let tool = ToolContext::new(ResourceId::parse("hookforge:staff").unwrap(), 0);
        assert!(!tool.with_damage(1000).is_broken());
    }

    #[test]
    fn stats_add_and_multiply() {
        let mut stats = StatsBuilder::new();
        stats.add("durability", 100.0);
        stats.add("durability", 50.0);
        stats.multiply("durability", 2.0);
        stats.multiply("attack_speed", 3.0);
        assert_eq!(stats.get("durability"), 300.0);
        assert_eq!(stats.get("attack_speed"), 0.0);
        assert_eq!(stats.iter().count(), 1);
    }
}
