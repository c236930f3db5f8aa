//! Content loaders for reading designer data from files.
//!
//! RON holds structured content (trees, abilities, scenarios); TOML holds
//! engine configuration. All loaders use the formats defined in
//! [`crate::formats`].

pub mod abilities;
pub mod config;
pub mod controllers;
pub mod scenario;

pub use abilities::AbilityLoader;
pub use config::ConfigLoader;
pub use controllers::ControllerLoader;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
