//! Error types for dbt-core.
//!
//! The decision engine itself never fails: missing nodes, empty inputs and
//! mismatched lengths are logged and skipped. Errors only surface from
//! configuration entry points where rejecting bad input is more useful than
//! silently accepting it.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("unknown ability category label '{0}'")]
    UnknownCategory(String),

    #[error("node {node} of tree {tree} is not a task")]
    NotATask {
        tree: crate::TreeId,
        node: behavior_tree::NodeId,
    },

    #[error("node {node} does not exist in tree {tree}")]
    UnknownNode {
        tree: crate::TreeId,
        node: behavior_tree::NodeId,
    },
}
