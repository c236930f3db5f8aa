//! Tree scan performed on every ability activation.
//!
//! For each registered tree whose controller has dynamic behavior enabled,
//! composites are visited depth-first. A composite whose limit change is
//! reached by the usage count triggers a category match over its subtree and
//! a swap between the `same` and `opposite` groups. Composites below a
//! triggered composite are not evaluated again in the same pass, since the
//! ancestor's swap already covered their tasks.
//!
//! Independently of swaps, every active limit change is collected so the
//! caller can run the reset check against the largest one.

use std::collections::HashSet;

use behavior_tree::NodeId;
use tracing::{debug, info};

use dbt_core::{
    AbilityCategory, ControllerId, NodeKey, SwapReport, TreeId, collect_matches, swap_priorities,
};

use crate::Session;
use crate::events::{Event, TreeEvent};

/// A swap applied to one composite of one tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeSwap {
    pub tree: TreeId,
    pub controller: ControllerId,
    pub composite: NodeId,
    pub report: SwapReport,
}

/// Result of scanning all registered trees for one activation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub swaps: Vec<TreeSwap>,
    /// Positive limit changes of every scanned composite.
    pub limit_changes: Vec<i32>,
    pub trees_scanned: usize,
}

impl Session {
    pub(crate) fn scan_trees(
        &mut self,
        ability: &str,
        category: AbilityCategory,
        usage: u32,
    ) -> ScanSummary {
        let mut summary = ScanSummary::default();
        let Self {
            store,
            evaluator,
            trees,
            events,
            ..
        } = self;

        for registered in trees.iter_mut() {
            if !store.controller(registered.controller).dynamic_enabled {
                debug!(
                    target: "runtime::activation",
                    controller = %registered.controller,
                    tree = %registered.id,
                    "Dynamic behavior disabled for controller, skipping tree"
                );
                continue;
            }
            let Some(root) = registered.tree.root() else {
                continue;
            };
            summary.trees_scanned += 1;

            let mut covered: HashSet<NodeId> = HashSet::new();
            for composite in registered.tree.composites_depth_first(root) {
                let key = NodeKey::new(registered.id, composite);
                let limit_change = store.limit_change(key);
                if limit_change > 0 {
                    summary.limit_changes.push(limit_change);
                }

                if covered.contains(&composite) || !evaluator.evaluate(store, key, usage) {
                    continue;
                }

                info!(
                    target: "runtime::activation",
                    ability,
                    %category,
                    usage,
                    limit_change,
                    tree = registered.tree.name(),
                    node = registered.tree.node(composite).map(|n| n.name()).unwrap_or("?"),
                    "Threshold reached"
                );

                let matches =
                    collect_matches(&registered.tree, registered.id, composite, category, store);
                covered.extend(registered.tree.depth_first(composite));
                if matches.is_empty() {
                    continue;
                }

                let report = swap_priorities(&mut registered.tree, &matches.same, &matches.opposite);
                if report.changed() {
                    events.publish(Event::Tree(TreeEvent {
                        tree: registered.id,
                        controller: registered.controller,
                        composite,
                        ability: ability.to_owned(),
                        category,
                        pairs_swapped: report.pairs_swapped,
                    }));
                }
                summary.swaps.push(TreeSwap {
                    tree: registered.id,
                    controller: registered.controller,
                    composite,
                    report,
                });
            }
        }

        debug!(
            target: "runtime::activation",
            ability,
            trees = summary.trees_scanned,
            swaps = summary.swaps.len(),
            limits = summary.limit_changes.len(),
            "Tree scan finished"
        );
        summary
    }
}
