//! Scenario installation and replay.
//!
//! A [`Scenario`] from `dbt-content` describes controllers with annotated
//! trees, ability definitions and an activation script. [`ScenarioRunner`]
//! installs the controllers into a fresh [`Session`], keeps one
//! [`UsageTracked`] instance per (entity, ability) pair and replays the
//! script.

use std::collections::HashMap;

use behavior_tree::BehaviorTree;
use dbt_content::{AbilitySpec, ActivationStep, Scenario};
use dbt_core::{ControllerId, EntityId, NodeKey, TreeId};
use tracing::{info, warn};

use crate::{ActivationOutcome, Result, RuntimeConfig, RuntimeError, Session, UsageTracked};

/// Totals of a replay.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub activations: usize,
    pub pairs_swapped: usize,
    pub resets: usize,
    /// Steps skipped because they named an unknown ability.
    pub skipped: usize,
}

pub struct ScenarioRunner {
    session: Session,
    abilities: HashMap<String, AbilitySpec>,
    instances: HashMap<(EntityId, String), UsageTracked<AbilitySpec>>,
    controllers: Vec<(String, TreeId)>,
}

impl ScenarioRunner {
    /// Creates a session and installs every controller of `scenario` into it.
    pub fn install(scenario: &Scenario, config: RuntimeConfig) -> Result<Self> {
        let mut session = Session::new(config);
        let mut controllers = Vec::with_capacity(scenario.controllers.len());

        for spec in &scenario.controllers {
            let controller = ControllerId(spec.id);
            let built = spec.build()?;
            let tree = session.register_tree(controller, built.tree)?;
            session.set_controller(controller, spec.settings);

            for annotation in &built.annotations {
                if let Some(limit_change) = annotation.limit_change {
                    session.set_limit_change(tree, annotation.node, limit_change)?;
                }
                let key = NodeKey::new(tree, annotation.node);
                if annotation.dynamic {
                    session.metadata_mut().set_dynamic(key, true);
                }
                if let Some(category) = annotation.category {
                    session.metadata_mut().set_category(key, category);
                }
            }

            info!(
                target: "runtime::scenario",
                controller = %spec.name,
                tree = %spec.tree_name,
                annotations = built.annotations.len(),
                "Controller installed"
            );
            controllers.push((spec.name.clone(), tree));
        }

        let mut abilities = HashMap::with_capacity(scenario.abilities.len());
        for ability in &scenario.abilities {
            if abilities
                .insert(ability.name.clone(), ability.clone())
                .is_some()
            {
                return Err(RuntimeError::InvalidScenario(format!(
                    "duplicate ability '{}'",
                    ability.name
                )));
            }
        }

        Ok(Self {
            session,
            abilities,
            instances: HashMap::new(),
            controllers,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Tree of the controller with the given scenario name.
    pub fn controller_tree(&self, name: &str) -> Option<&BehaviorTree> {
        let (_, id) = self.controllers.iter().find(|(n, _)| n == name)?;
        self.session.tree(*id)
    }

    pub fn controller_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.controllers.iter().map(|(name, _)| name.as_str())
    }

    /// Activates `ability` for `entity`. Unknown abilities are logged and skipped.
    pub fn activate(&mut self, entity: EntityId, ability: &str) -> Option<ActivationOutcome> {
        let Some(spec) = self.abilities.get(ability) else {
            warn!(target: "runtime::scenario", %entity, ability, "Unknown ability, skipping");
            return None;
        };

        let instance = self
            .instances
            .entry((entity, ability.to_owned()))
            .or_insert_with(|| UsageTracked::new(spec.clone()));
        Some(instance.activate(entity, &mut self.session))
    }

    pub fn replay(&mut self, steps: &[ActivationStep]) -> ReplayReport {
        let mut report = ReplayReport::default();
        for step in steps {
            for _ in 0..step.repeat {
                match self.activate(step.entity, &step.ability) {
                    Some(outcome) => {
                        report.activations += 1;
                        report.pairs_swapped += outcome.pairs_swapped();
                        report.resets += usize::from(outcome.reset);
                    }
                    None => report.skipped += 1,
                }
            }
        }

        info!(
            target: "runtime::scenario",
            activations = report.activations,
            pairs_swapped = report.pairs_swapped,
            resets = report.resets,
            skipped = report.skipped,
            "Replay finished"
        );
        report
    }

    /// Instance usage count of `ability` for `entity`.
    pub fn usage_count(&self, entity: EntityId, ability: &str) -> u32 {
        self.instances
            .get(&(entity, ability.to_owned()))
            .map_or(0, UsageTracked::usage_count)
    }

    /// Shuts the session down and returns it.
    pub fn finish(mut self) -> Session {
        self.session.shutdown();
        self.session
    }
}
