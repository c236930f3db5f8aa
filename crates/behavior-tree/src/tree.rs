//! The tree arena.
//!
//! [`BehaviorTree`] owns every node in a flat `Vec`. Parent links and ordered
//! child lists are stored as [`NodeId`]s, so there are no reference cycles and
//! no dangling pointers: a stale id simply resolves to `None`.

use crate::{CompositeKind, Node, NodeId, NodeKind, TreeError};

/// An arena of behavior tree nodes rooted at a single composite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BehaviorTree {
    name: String,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl BehaviorTree {
    /// Creates an empty tree. Call [`set_root`](Self::set_root) before adding children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates the root composite.
    pub fn set_root(
        &mut self,
        name: impl Into<String>,
        kind: CompositeKind,
    ) -> Result<NodeId, TreeError> {
        if self.root.is_some() {
            return Err(TreeError::RootAlreadySet);
        }
        let id = self.alloc(Node::new(name, NodeKind::Composite(kind), None))?;
        self.root = Some(id);
        Ok(id)
    }

    /// Appends a composite as the last child of `parent`.
    pub fn add_composite(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: CompositeKind,
    ) -> Result<NodeId, TreeError> {
        self.push_child(parent, name.into(), NodeKind::Composite(kind))
    }

    /// Appends a task as the last child of `parent`.
    pub fn add_task(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, TreeError> {
        self.push_child(parent, name.into(), NodeKind::Task)
    }

    fn push_child(
        &mut self,
        parent: NodeId,
        name: String,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        match self.node(parent) {
            None => return Err(TreeError::UnknownNode(parent)),
            Some(node) if node.is_task() => return Err(TreeError::NotAComposite(parent)),
            Some(_) => {}
        }

        let id = self.alloc(Node::new(name, kind, Some(parent)))?;
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    fn alloc(&mut self, node: Node) -> Result<NodeId, TreeError> {
        let raw = u32::try_from(self.nodes.len()).map_err(|_| TreeError::CapacityExceeded)?;
        self.nodes.push(node);
        Ok(NodeId(raw))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Ordered child slots of `id`; empty for tasks and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Position of `id` within its parent's child list.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Finds the first node with the given name in depth-first order.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        let root = self.root?;
        self.depth_first(root)
            .into_iter()
            .find(|&id| self.node(id).is_some_and(|node| node.name == name))
    }

    /// Returns every node reachable from `from` in depth-first pre-order.
    ///
    /// Children are visited in their current slot order.
    pub fn depth_first(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(from) {
            return order;
        }

        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            order.push(id);
            // Reverse so the leftmost child is visited first
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Returns the composite nodes reachable from `from` in depth-first pre-order.
    pub fn composites_depth_first(&self, from: NodeId) -> Vec<NodeId> {
        self.depth_first(from)
            .into_iter()
            .filter(|&id| self.node(id).is_some_and(Node::is_composite))
            .collect()
    }

    /// Exchanges the child slots at positions `a` and `b` of `parent`.
    ///
    /// Returns `false` without touching the tree if `parent` is unknown or
    /// either position is out of bounds. Parent links are unaffected since
    /// both children keep the same parent.
    pub fn swap_children(&mut self, parent: NodeId, a: usize, b: usize) -> bool {
        let Some(node) = self.nodes.get_mut(parent.index()) else {
            return false;
        };
        if a >= node.children.len() || b >= node.children.len() {
            return false;
        }
        node.children.swap(a, b);
        true
    }

    /// Names of the children of `parent` in slot order.
    pub fn child_names(&self, parent: NodeId) -> Vec<&str> {
        self.children(parent)
            .iter()
            .filter_map(|&id| self.node(id).map(Node::name))
            .collect()
    }
}
