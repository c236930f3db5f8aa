//! Node data stored in the tree arena.

use core::fmt;

/// Stable identifier of a node inside one [`BehaviorTree`](crate::BehaviorTree).
///
/// Ids are arena indices. They are only meaningful for the tree that issued
/// them and remain valid for that tree's whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Control-flow behavior of a composite node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompositeKind {
    /// Runs children left to right until one fails (AND).
    Sequence,

    /// Runs children left to right until one succeeds (OR).
    Selector,

    /// Runs a main task with a background subtree.
    ///
    /// Child slots have fixed roles (main, background), so their order is
    /// not a priority order.
    SimpleParallel,
}

impl CompositeKind {
    /// Returns true if child position encodes execution priority.
    ///
    /// Only such containers may have their children reordered.
    pub const fn is_priority_ordered(self) -> bool {
        match self {
            Self::Sequence | Self::Selector => true,
            Self::SimpleParallel => false,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Selector => "selector",
            Self::SimpleParallel => "simple_parallel",
        }
    }
}

/// Kind of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Control-flow node with ordered children.
    Composite(CompositeKind),

    /// Leaf action.
    Task,
}

/// A single node of the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(name: impl Into<String>, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Parent composite, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Ordered child slots. Always empty for tasks.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_task(&self) -> bool {
        matches!(self.kind, NodeKind::Task)
    }

    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, NodeKind::Composite(_))
    }

    /// Returns the composite kind, or `None` for tasks.
    pub fn composite_kind(&self) -> Option<CompositeKind> {
        match self.kind {
            NodeKind::Composite(kind) => Some(kind),
            NodeKind::Task => None,
        }
    }
}
