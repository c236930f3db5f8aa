//! Event payloads for each topic.

use behavior_tree::NodeId;
use dbt_core::{AbilityCategory, ControllerId, EntityId, TreeId};

/// Events about ability usage counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageEvent {
    /// An ability was used and its counter incremented.
    AbilityUsed {
        entity: EntityId,
        ability: String,
        count: u32,
    },

    /// The usage counters of an entity were cleared.
    UsageReset {
        entity: EntityId,
        ability: String,
        /// Instance count that triggered the reset.
        usage: u32,
        max_limit_change: i32,
    },
}

/// Events about behavior tree mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEvent {
    pub tree: TreeId,
    pub controller: ControllerId,
    /// Composite whose threshold triggered the swap.
    pub composite: NodeId,
    pub ability: String,
    pub category: AbilityCategory,
    pub pairs_swapped: usize,
}
