//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of calling [`BehaviorTree::add_composite`] and
//! [`BehaviorTree::add_task`] by hand, describe the shape with [`NodeSpec`]
//! values and build the arena in one go:
//!
//! ```rust
//! use behavior_tree::builder::{selector, sequence, task};
//!
//! let tree = selector("root", vec![
//!     sequence("combat", vec![task("attack"), task("block")]),
//!     task("idle"),
//! ])
//! .build("guard")
//! .unwrap();
//!
//! assert_eq!(tree.len(), 5);
//! ```

use crate::{BehaviorTree, CompositeKind, NodeId, TreeError};

/// Declarative description of a subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeSpec {
    Composite {
        name: String,
        kind: CompositeKind,
        children: Vec<NodeSpec>,
    },
    Task {
        name: String,
    },
}

impl NodeSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Composite { name, .. } | Self::Task { name } => name,
        }
    }

    /// Builds a new tree whose root is this spec.
    ///
    /// The root must be a composite.
    pub fn build(&self, tree_name: impl Into<String>) -> Result<BehaviorTree, TreeError> {
        let Self::Composite { name, kind, children } = self else {
            return Err(TreeError::RootMustBeComposite);
        };

        let mut tree = BehaviorTree::new(tree_name);
        let root = tree.set_root(name.clone(), *kind)?;
        for child in children {
            child.attach(&mut tree, root)?;
        }
        Ok(tree)
    }

    /// Appends this spec under `parent` and returns the new node's id.
    pub fn attach(&self, tree: &mut BehaviorTree, parent: NodeId) -> Result<NodeId, TreeError> {
        match self {
            Self::Task { name } => tree.add_task(parent, name.clone()),
            Self::Composite { name, kind, children } => {
                let id = tree.add_composite(parent, name.clone(), *kind)?;
                for child in children {
                    child.attach(tree, id)?;
                }
                Ok(id)
            }
        }
    }
}

/// Creates a sequence spec.
#[inline]
pub fn sequence(name: impl Into<String>, children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::Composite {
        name: name.into(),
        kind: CompositeKind::Sequence,
        children,
    }
}

/// Creates a selector spec.
#[inline]
pub fn selector(name: impl Into<String>, children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::Composite {
        name: name.into(),
        kind: CompositeKind::Selector,
        children,
    }
}

/// Creates a simple-parallel spec.
#[inline]
pub fn simple_parallel(name: impl Into<String>, children: Vec<NodeSpec>) -> NodeSpec {
    NodeSpec::Composite {
        name: name.into(),
        kind: CompositeKind::SimpleParallel,
        children,
    }
}

/// Creates a task spec.
#[inline]
pub fn task(name: impl Into<String>) -> NodeSpec {
    NodeSpec::Task { name: name.into() }
}
