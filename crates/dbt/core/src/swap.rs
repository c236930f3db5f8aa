//! Pairwise priority exchange between two groups of task nodes.
//!
//! Given the `same` and `opposite` matches of an ability, the swap engine
//! moves each node of one group into the slot of its partner from the other
//! group. Only child slots of shared parents change; nodes never move between
//! parents.
//!
//! # Pairing
//!
//! 1. If the lists differ in length, the longer one is truncated from its
//!    tail (lossy, logged as a warning).
//! 2. For every parent present in the first list, the child indices of both
//!    lists under that parent are sorted ascending and zipped.
//! 3. Each pair is exchanged in place. Out-of-bounds pairs and parents whose
//!    child order is not a priority order are skipped.

use std::collections::BTreeMap;

use behavior_tree::{BehaviorTree, NodeId};
use tracing::{debug, info, trace, warn};

use crate::TaskNodeInfo;

/// Outcome of one swap pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapReport {
    pub pairs_swapped: usize,
    /// Entries dropped from the longer list.
    pub trimmed: usize,
    /// Pairs not applied (bounds or container kind).
    pub skipped: usize,
}

impl SwapReport {
    pub fn changed(&self) -> bool {
        self.pairs_swapped > 0
    }
}

pub fn swap_priorities(
    tree: &mut BehaviorTree,
    first: &[TaskNodeInfo],
    second: &[TaskNodeInfo],
) -> SwapReport {
    let mut report = SwapReport::default();

    let len = first.len().min(second.len());
    if first.len() != second.len() {
        report.trimmed = first.len().abs_diff(second.len());
        warn!(
            target: "dbt::swap",
            tree = tree.name(),
            first = first.len(),
            second = second.len(),
            kept = len,
            "Swap lists differ in length, trimming the longer list"
        );
    }
    if len == 0 {
        debug!(target: "dbt::swap", tree = tree.name(), "Nothing to swap");
        return report;
    }
    let (first, second) = (&first[..len], &second[..len]);

    for (parent, mut first_indices) in group_by_parent(first) {
        let mut second_indices: Vec<usize> = second
            .iter()
            .filter(|info| info.parent == parent)
            .map(|info| info.child_index)
            .collect();
        if second_indices.is_empty() {
            continue;
        }

        let reorderable = tree
            .node(parent)
            .and_then(|node| node.composite_kind())
            .is_some_and(|kind| kind.is_priority_ordered());
        if !reorderable {
            debug!(
                target: "dbt::swap",
                tree = tree.name(),
                %parent,
                "Parent is not a priority-ordered composite, skipping"
            );
            report.skipped += first_indices.len().min(second_indices.len());
            continue;
        }

        first_indices.sort_unstable();
        second_indices.sort_unstable();

        for (a, b) in first_indices.into_iter().zip(second_indices) {
            if tree.swap_children(parent, a, b) {
                report.pairs_swapped += 1;
                trace!(target: "dbt::swap", %parent, a, b, "Slots exchanged");
            } else {
                report.skipped += 1;
                trace!(target: "dbt::swap", %parent, a, b, "Slot pair out of bounds");
            }
        }
    }

    info!(
        target: "dbt::swap",
        tree = tree.name(),
        pairs = report.pairs_swapped,
        trimmed = report.trimmed,
        skipped = report.skipped,
        "Priority swap applied"
    );
    report
}

/// Child indices grouped by parent, parents in order of first appearance.
fn group_by_parent(infos: &[TaskNodeInfo]) -> Vec<(NodeId, Vec<usize>)> {
    let mut order: Vec<NodeId> = Vec::new();
    let mut groups: BTreeMap<NodeId, Vec<usize>> = BTreeMap::new();
    for info in infos {
        groups
            .entry(info.parent)
            .or_insert_with(|| {
                order.push(info.parent);
                Vec::new()
            })
            .push(info.child_index);
    }
    order
        .into_iter()
        .filter_map(|parent| groups.remove(&parent).map(|indices| (parent, indices)))
        .collect()
}

#[cfg(test)]
mod tests {
    use behavior_tree::builder::{selector, sequence, simple_parallel, task};

    use super::*;

    fn info(tree: &BehaviorTree, name: &str) -> TaskNodeInfo {
        let node = tree.find(name).unwrap();
        TaskNodeInfo {
            node,
            parent: tree.parent(node).unwrap(),
            child_index: tree.child_index(node).unwrap(),
        }
    }

    fn four_children() -> BehaviorTree {
        selector(
            "root",
            vec![task("n1"), task("n3"), task("n2"), task("n4")],
        )
        .build("t")
        .unwrap()
    }

    #[test]
    fn swaps_sorted_indices_pairwise() {
        let mut tree = four_children();
        let a = [info(&tree, "n1"), info(&tree, "n2")];
        let b = [info(&tree, "n3"), info(&tree, "n4")];

        let report = swap_priorities(&mut tree, &a, &b);

        assert_eq!(report.pairs_swapped, 2);
        assert_eq!(
            tree.child_names(tree.root().unwrap()),
            vec!["n3", "n1", "n4", "n2"]
        );
    }

    #[test]
    fn pairing_ignores_input_order() {
        let mut tree = four_children();
        let a = [info(&tree, "n2"), info(&tree, "n1")];
        let b = [info(&tree, "n4"), info(&tree, "n3")];

        swap_priorities(&mut tree, &a, &b);

        assert_eq!(
            tree.child_names(tree.root().unwrap()),
            vec!["n3", "n1", "n4", "n2"]
        );
    }

    #[test]
    fn mismatched_lengths_trim_to_shorter() {
        let mut tree = selector(
            "root",
            vec![task("a1"), task("a2"), task("a3"), task("b1")],
        )
        .build("t")
        .unwrap();
        let a = [info(&tree, "a1"), info(&tree, "a2"), info(&tree, "a3")];
        let b = [info(&tree, "b1")];

        let report = swap_priorities(&mut tree, &a, &b);

        assert_eq!(report.pairs_swapped, 1);
        assert_eq!(report.trimmed, 2);
        assert_eq!(
            tree.child_names(tree.root().unwrap()),
            vec!["b1", "a2", "a3", "a1"]
        );
    }

    #[test]
    fn empty_input_is_noop() {
        let mut tree = four_children();
        let b = [info(&tree, "n3")];

        let report = swap_priorities(&mut tree, &[], &b);

        assert!(!report.changed());
        assert_eq!(report.trimmed, 1);
        assert_eq!(
            tree.child_names(tree.root().unwrap()),
            vec!["n1", "n3", "n2", "n4"]
        );
    }

    #[test]
    fn only_shared_parents_are_paired() {
        let mut tree = selector(
            "root",
            vec![
                sequence("left", vec![task("l_off"), task("l_def")]),
                sequence("right", vec![task("r_def"), task("r_off")]),
            ],
        )
        .build("t")
        .unwrap();
        let a = [info(&tree, "l_off"), info(&tree, "r_off")];
        let b = [info(&tree, "l_def"), info(&tree, "r_def")];

        let report = swap_priorities(&mut tree, &a, &b);

        assert_eq!(report.pairs_swapped, 2);
        let left = tree.find("left").unwrap();
        let right = tree.find("right").unwrap();
        assert_eq!(tree.child_names(left), vec!["l_def", "l_off"]);
        assert_eq!(tree.child_names(right), vec!["r_off", "r_def"]);
    }

    #[test]
    fn out_of_bounds_pairs_are_skipped() {
        let mut tree = four_children();
        let root = tree.root().unwrap();
        let stale = TaskNodeInfo {
            node: tree.find("n1").unwrap(),
            parent: root,
            child_index: 9,
        };
        let b = [info(&tree, "n3")];

        let report = swap_priorities(&mut tree, &[stale], &b);

        assert_eq!(report.pairs_swapped, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(tree.child_names(root), vec!["n1", "n3", "n2", "n4"]);
    }

    #[test]
    fn simple_parallel_children_keep_their_slots() {
        let mut tree = selector(
            "root",
            vec![simple_parallel("par", vec![task("main"), task("background")])],
        )
        .build("t")
        .unwrap();
        let a = [info(&tree, "main")];
        let b = [info(&tree, "background")];

        let report = swap_priorities(&mut tree, &a, &b);

        assert_eq!(report.pairs_swapped, 0);
        assert_eq!(report.skipped, 1);
        let par = tree.find("par").unwrap();
        assert_eq!(tree.child_names(par), vec!["main", "background"]);
    }
}
