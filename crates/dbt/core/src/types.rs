//! Identifier and transient record types shared across modules.

use core::fmt;

use behavior_tree::NodeId;

/// Unique identifier of an acting entity (the owner of a usage ledger entry).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity:{}", self.0)
    }
}

/// Identifier of a tree registered with a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeId(pub u32);

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree:{}", self.0)
    }
}

/// Identifier of an AI controller driving one tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerId(pub u32);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "controller:{}", self.0)
    }
}

/// Session-wide address of a tree node.
///
/// [`NodeId`]s are only unique within one tree, so metadata is keyed by the
/// pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey {
    pub tree: TreeId,
    pub node: NodeId,
}

impl NodeKey {
    pub const fn new(tree: TreeId, node: NodeId) -> Self {
        Self { tree, node }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tree, self.node)
    }
}

/// A matched task node and where it currently sits.
///
/// Recomputed on every evaluation and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskNodeInfo {
    pub node: NodeId,
    pub parent: NodeId,
    pub child_index: usize,
}
