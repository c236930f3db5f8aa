//! Scenario loader.

use std::path::Path;

use crate::formats::Scenario;
use crate::loaders::{LoadResult, read_file};

/// Loader for replayable scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    /// Parses a scenario and checks its cross references.
    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        for controller in &scenario.controllers {
            controller.build().map_err(|e| {
                anyhow::anyhow!("Invalid tree for controller '{}': {}", controller.name, e)
            })?;
        }
        for step in &scenario.activations {
            if scenario.ability(&step.ability).is_none() {
                anyhow::bail!("Activation references unknown ability '{}'", step.ability);
            }
        }

        tracing::debug!(
            target: "dbt::content",
            controllers = scenario.controllers.len(),
            abilities = scenario.abilities.len(),
            activations = scenario.activations.len(),
            "Scenario parsed"
        );
        Ok(scenario)
    }

    /// The scenario shipped with the crate.
    pub fn builtin_duel() -> LoadResult<Scenario> {
        Self::parse(include_str!("../../data/scenarios/duel.ron"))
    }
}
