//! Swap and reset conditions.

use tracing::{debug, info};

use crate::{NodeKey, NodeMetadataStore, ResetPolicy};

/// Returns true if `usage` has reached an active `limit_change`.
///
/// Equality counts as reached. Non-positive limits are inactive and never
/// trigger.
#[inline]
pub fn limit_reached(limit_change: i32, usage: u32) -> bool {
    limit_change > 0 && i64::from(usage) >= i64::from(limit_change)
}

/// Evaluates node thresholds against a usage count.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThresholdEvaluator {
    policy: ResetPolicy,
}

impl ThresholdEvaluator {
    pub const fn new(policy: ResetPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Looks up the node's limit change and checks it against `usage`.
    pub fn evaluate(&self, store: &NodeMetadataStore, node: NodeKey, usage: u32) -> bool {
        let limit_change = store.limit_change(node);
        let met = limit_reached(limit_change, usage);
        if limit_change > 0 {
            debug!(
                target: "dbt::threshold",
                %node,
                limit_change,
                usage,
                met,
                "Threshold evaluated"
            );
        }
        met
    }

    /// Returns true if `usage` hits the reset point for the largest limit.
    ///
    /// An empty list, or one without any positive limit, never resets.
    pub fn check_reset(&self, limit_changes: &[i32], usage: u32) -> bool {
        let Some(&max) = limit_changes.iter().max() else {
            debug!(target: "dbt::threshold", "No limit changes found, skipping reset check");
            return false;
        };
        if max <= 0 {
            return false;
        }

        let target = match self.policy {
            ResetPolicy::AtMax => i64::from(max),
            ResetPolicy::PastMax => i64::from(max) + 1,
        };
        let triggered = i64::from(usage) == target;

        info!(
            target: "dbt::threshold",
            max_limit_change = max,
            usage,
            policy = %self.policy,
            triggered,
            "Reset check"
        );
        triggered
    }
}
