//! Abilities and the usage-tracking decorator.
//!
//! An ability only has to say who it is and what category it belongs to
//! ([`AbilityBehavior`]). Wrapping it in [`UsageTracked`] adds the whole
//! dynamic-behavior pipeline to its activation:
//!
//! ```text
//! Idle -> Activated -> UsageIncremented -> TreeScanned -> ResetTriggered -> Idle
//!                                                     \-> NoOp ----------/
//! ```
//!
//! One `UsageTracked` instance exists per (entity, ability) pair, so its
//! usage count is the count the thresholds are compared against.

use tracing::{info, trace};

use dbt_core::{AbilityCategory, EntityId};
use dbt_content::AbilitySpec;

use crate::activation::{ScanSummary, TreeSwap};
use crate::events::{Event, UsageEvent};
use crate::Session;

/// The capability an ability exposes to the usage tracker.
pub trait AbilityBehavior {
    /// Stable name used as the usage ledger key.
    fn name(&self) -> &str;

    fn category(&self) -> AbilityCategory;

    /// The ability's own effect, run before usage is counted.
    fn on_activate(&mut self, _entity: EntityId) {}
}

impl AbilityBehavior for AbilitySpec {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> AbilityCategory {
        self.category
    }
}

/// Step of the per-instance activation state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivationPhase {
    #[default]
    Idle,
    Activated,
    UsageIncremented,
    TreeScanned,
    ResetTriggered,
    NoOp,
}

/// What one activation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationOutcome {
    /// Instance usage count the thresholds were evaluated against.
    pub usage: u32,
    /// Per-entity ledger count after the increment.
    pub ledger_count: u32,
    pub swaps: Vec<TreeSwap>,
    pub reset: bool,
    /// Phases passed through, ending with `Idle`.
    pub phases: Vec<ActivationPhase>,
}

impl ActivationOutcome {
    pub fn pairs_swapped(&self) -> usize {
        self.swaps.iter().map(|s| s.report.pairs_swapped).sum()
    }
}

/// Decorator that counts activations of `A` and drives tree reordering.
#[derive(Clone, Debug)]
pub struct UsageTracked<A> {
    inner: A,
    usage_count: u32,
    phase: ActivationPhase,
}

impl<A: AbilityBehavior> UsageTracked<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            usage_count: 0,
            phase: ActivationPhase::Idle,
        }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    /// Current phase; always `Idle` between activations.
    pub fn phase(&self) -> ActivationPhase {
        self.phase
    }

    /// Runs one activation by `entity` to completion.
    ///
    /// Never fails. On a closed session the ability still runs its own effect
    /// but nothing is counted or scanned.
    pub fn activate(&mut self, entity: EntityId, session: &mut Session) -> ActivationOutcome {
        let mut phases = Vec::with_capacity(5);

        self.enter(ActivationPhase::Activated, &mut phases);
        self.inner.on_activate(entity);

        if !session.is_open() {
            self.enter(ActivationPhase::NoOp, &mut phases);
            self.enter(ActivationPhase::Idle, &mut phases);
            return ActivationOutcome {
                usage: self.usage_count,
                ledger_count: 0,
                swaps: Vec::new(),
                reset: false,
                phases,
            };
        }

        let name = self.inner.name().to_owned();
        let category = self.inner.category();

        self.usage_count = self.usage_count.saturating_add(1);
        let usage = self.usage_count;
        let ledger_count = session.record_use(entity, &name);
        info!(
            target: "runtime::ability",
            %entity,
            ability = %name,
            %category,
            opposite = %category.opposite(),
            usage,
            "Ability used"
        );
        self.enter(ActivationPhase::UsageIncremented, &mut phases);

        let ScanSummary {
            swaps,
            limit_changes,
            ..
        } = session.scan_trees(&name, category, usage);
        self.enter(ActivationPhase::TreeScanned, &mut phases);

        let reset = session.evaluator.check_reset(&limit_changes, usage);
        if reset {
            let max_limit_change = limit_changes.iter().copied().max().unwrap_or(0);
            info!(
                target: "runtime::ability",
                %entity,
                ability = %name,
                usage,
                max_limit_change,
                "Usage reset triggered"
            );
            self.usage_count = 0;
            session.reset_usage(entity);
            session.events.publish(Event::Usage(UsageEvent::UsageReset {
                entity,
                ability: name,
                usage,
                max_limit_change,
            }));
            self.enter(ActivationPhase::ResetTriggered, &mut phases);
        } else {
            self.enter(ActivationPhase::NoOp, &mut phases);
        }

        self.enter(ActivationPhase::Idle, &mut phases);
        ActivationOutcome {
            usage,
            ledger_count,
            swaps,
            reset,
            phases,
        }
    }

    fn enter(&mut self, next: ActivationPhase, phases: &mut Vec<ActivationPhase>) {
        trace!(target: "runtime::ability", from = ?self.phase, to = ?next, "Phase transition");
        self.phase = next;
        phases.push(next);
    }
}
