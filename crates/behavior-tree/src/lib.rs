//! Arena-backed behavior tree structure.
//!
//! This library models the *shape* of a behavior tree: composite nodes with
//! ordered children and task leaves. Execution is owned by the host; what this
//! crate provides is stable addressing and safe in-place reordering.
//!
//! - **Arena storage**: nodes live in a single `Vec` and are addressed by [`NodeId`]
//! - **Explicit links**: every node stores its parent and its ordered child ids
//! - **No removal**: ids stay valid for the whole lifetime of the tree
//! - **Tagged kinds**: [`NodeKind`] distinguishes composites from tasks
//!
//! # Architecture
//!
//! - [`BehaviorTree`]: the arena and its traversal/mutation API
//! - [`Node`], [`NodeKind`], [`CompositeKind`]: node data
//! - [`NodeSpec`] and the [`builder`] helpers: declarative construction

pub mod builder;
pub mod error;
pub mod node;
pub mod tree;

// Re-export core types for ergonomic API
pub use builder::NodeSpec;
pub use error::TreeError;
pub use node::{CompositeKind, Node, NodeId, NodeKind};
pub use tree::BehaviorTree;
