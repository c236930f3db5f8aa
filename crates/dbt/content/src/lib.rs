//! Designer content for dynamic behavior trees.
//!
//! Trees, node metadata, controller settings, ability definitions and engine
//! configuration are authored as RON/TOML files and loaded here. The formats
//! in [`formats`] replace the editor panels the values were originally
//! entered in.

pub mod formats;
pub mod loaders;

pub use formats::{
    AbilitySpec, ActivationStep, BuiltTree, ContentNode, ControllerSpec, NodeAnnotation, Scenario,
};
pub use loaders::{AbilityLoader, ConfigLoader, ControllerLoader, LoadResult, ScenarioLoader};
