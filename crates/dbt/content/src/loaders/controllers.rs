//! Controller and tree loader.

use std::path::Path;

use crate::formats::ControllerSpec;
use crate::loaders::{LoadResult, read_file};

/// Loader for AI controllers and their annotated trees from RON files.
///
/// RON format: `Vec<ControllerSpec>`
pub struct ControllerLoader;

impl ControllerLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<ControllerSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses controllers and verifies every tree builds.
    pub fn parse(content: &str) -> LoadResult<Vec<ControllerSpec>> {
        let controllers: Vec<ControllerSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse controllers RON: {}", e))?;

        for controller in &controllers {
            controller.build().map_err(|e| {
                anyhow::anyhow!(
                    "Invalid tree '{}' for controller '{}': {}",
                    controller.tree_name,
                    controller.name,
                    e
                )
            })?;
        }
        Ok(controllers)
    }
}
