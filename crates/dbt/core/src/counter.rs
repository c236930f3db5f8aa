//! Per-entity ability usage counts.
//!
//! The ledger maps `(entity, ability name)` to the number of activations since
//! the entity's last reset. Entries are created on first use; a reset drops
//! every entry of the entity so later reads return zero.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::EntityId;

#[derive(Clone, Debug, Default)]
pub struct UsageLedger {
    entities: HashMap<EntityId, HashMap<String, u32>>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the usage count of `ability` for `entity` and returns the new count.
    pub fn record_use(&mut self, entity: EntityId, ability: &str) -> u32 {
        let count = self
            .entities
            .entry(entity)
            .or_default()
            .entry(ability.to_owned())
            .or_insert(0);
        *count = count.saturating_add(1);

        debug!(
            target: "dbt::counter",
            %entity,
            ability,
            count = *count,
            "Ability usage recorded"
        );
        *count
    }

    /// Current count, zero if the ability was never used (or was reset).
    pub fn count(&self, entity: EntityId, ability: &str) -> u32 {
        self.entities
            .get(&entity)
            .and_then(|abilities| abilities.get(ability))
            .copied()
            .unwrap_or(0)
    }

    /// Clears every counter of `entity`.
    pub fn reset(&mut self, entity: EntityId) {
        self.entities.remove(&entity);
        info!(target: "dbt::counter", %entity, "All counters reset");
    }

    /// Snapshot of all counters of `entity`.
    pub fn stats(&self, entity: EntityId) -> HashMap<String, u32> {
        self.entities.get(&entity).cloned().unwrap_or_default()
    }

    /// Counters of `entity` sorted by count (descending), then by name.
    pub fn sorted_stats(&self, entity: EntityId) -> Vec<(String, u32)> {
        let mut stats: Vec<(String, u32)> = self.stats(entity).into_iter().collect();
        stats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        stats
    }

    /// Writes the usage report of `entity` to the log.
    pub fn log_stats(&self, entity: EntityId) {
        let stats = self.sorted_stats(entity);
        info!(target: "dbt::counter", %entity, "=== Ability usage stats ===");
        if stats.is_empty() {
            info!(target: "dbt::counter", %entity, "No abilities used yet");
        }
        for (ability, count) in &stats {
            info!(target: "dbt::counter", %entity, ability = %ability, count, "{} uses", count);
        }
    }

    /// Entities that currently have at least one counter.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: EntityId = EntityId(1);

    #[test]
    fn record_use_counts_from_one() {
        let mut ledger = UsageLedger::new();
        assert_eq!(ledger.record_use(HERO, "Fireball"), 1);
        assert_eq!(ledger.record_use(HERO, "Fireball"), 2);
        assert_eq!(ledger.count(HERO, "Fireball"), 2);
    }

    #[test]
    fn reset_restarts_counting() {
        let mut ledger = UsageLedger::new();
        ledger.record_use(HERO, "Fireball");
        ledger.record_use(HERO, "Fireball");
        ledger.reset(HERO);

        assert_eq!(ledger.count(HERO, "Fireball"), 0);
        assert_eq!(ledger.record_use(HERO, "Fireball"), 1);
    }

    #[test]
    fn counters_are_per_entity() {
        let mut ledger = UsageLedger::new();
        ledger.record_use(HERO, "Shield");
        ledger.record_use(EntityId(2), "Shield");
        ledger.reset(EntityId(2));

        assert_eq!(ledger.count(HERO, "Shield"), 1);
        assert_eq!(ledger.count(EntityId(2), "Shield"), 0);
    }

    #[test]
    fn sorted_stats_orders_by_count_then_name() {
        let mut ledger = UsageLedger::new();
        ledger.record_use(HERO, "Heal");
        ledger.record_use(HERO, "Bash");
        ledger.record_use(HERO, "Strike");
        ledger.record_use(HERO, "Strike");

        assert_eq!(
            ledger.sorted_stats(HERO),
            vec![
                ("Strike".to_owned(), 2),
                ("Bash".to_owned(), 1),
                ("Heal".to_owned(), 1),
            ]
        );
        assert!(ledger.sorted_stats(EntityId(9)).is_empty());
    }

    #[test]
    fn log_stats_leaves_counters_untouched() {
        let mut ledger = UsageLedger::new();
        ledger.log_stats(HERO);

        ledger.record_use(HERO, "Strike");
        ledger.record_use(HERO, "Heal");
        ledger.log_stats(HERO);

        assert_eq!(ledger.count(HERO, "Strike"), 1);
        assert_eq!(ledger.count(HERO, "Heal"), 1);
        assert_eq!(ledger.entities().collect::<Vec<_>>(), vec![HERO]);
    }
}
