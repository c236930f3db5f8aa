//! Errors raised while constructing a tree.
//!
//! Read-only traversal never fails (unknown ids yield empty results); only
//! structural mutations that would break the arena invariants are rejected.

use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("tree already has a root node")]
    RootAlreadySet,

    #[error("tree root must be a composite node")]
    RootMustBeComposite,

    #[error("node {0} does not exist in this tree")]
    UnknownNode(NodeId),

    #[error("node {0} is a task and cannot have children")]
    NotAComposite(NodeId),

    #[error("tree exceeds the maximum number of nodes")]
    CapacityExceeded,
}
