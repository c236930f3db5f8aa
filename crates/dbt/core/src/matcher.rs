//! Category matching over dynamic task nodes.

use behavior_tree::{BehaviorTree, NodeId};
use tracing::debug;

use crate::{AbilityCategory, NodeKey, NodeMetadataStore, TaskNodeInfo, TreeId};

/// Dynamic task nodes partitioned by category, in depth-first order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryMatches {
    /// Tasks whose category equals the ability's category.
    pub same: Vec<TaskNodeInfo>,
    /// Tasks whose category equals the ability category's opposite.
    pub opposite: Vec<TaskNodeInfo>,
}

impl CategoryMatches {
    pub fn is_empty(&self) -> bool {
        self.same.is_empty() && self.opposite.is_empty()
    }
}

/// Collects the dynamic task nodes below `root` matching `category` or its opposite.
///
/// Non-dynamic tasks and tasks of any third category are ignored. Category
/// labels compare case-insensitively.
pub fn collect_matches(
    tree: &BehaviorTree,
    tree_id: TreeId,
    root: NodeId,
    category: AbilityCategory,
    store: &NodeMetadataStore,
) -> CategoryMatches {
    let opposite = category.opposite();
    let mut matches = CategoryMatches::default();

    for id in tree.depth_first(root) {
        if id == root || !tree.node(id).is_some_and(|node| node.is_task()) {
            continue;
        }

        let key = NodeKey::new(tree_id, id);
        if !store.is_dynamic(key) {
            continue;
        }

        let (Some(parent), Some(child_index)) = (tree.parent(id), tree.child_index(id)) else {
            continue;
        };
        let info = TaskNodeInfo {
            node: id,
            parent,
            child_index,
        };

        let label = store.category(key);
        if category.matches_label(label) {
            matches.same.push(info);
        } else if opposite.matches_label(label) {
            matches.opposite.push(info);
        }
    }

    debug!(
        target: "dbt::matcher",
        tree = %tree_id,
        %root,
        %category,
        same = matches.same.len(),
        opposite = matches.opposite.len(),
        "Category matches collected"
    );
    matches
}

#[cfg(test)]
mod tests {
    use behavior_tree::builder::{selector, sequence, task};

    use super::*;

    const TREE: TreeId = TreeId(0);

    fn tag(store: &mut NodeMetadataStore, tree: &BehaviorTree, name: &str, category: &str) {
        let key = NodeKey::new(TREE, tree.find(name).unwrap());
        store.set_dynamic(key, true);
        store.set_category_label(key, category).unwrap();
    }

    fn names(tree: &BehaviorTree, infos: &[TaskNodeInfo]) -> Vec<String> {
        infos
            .iter()
            .map(|info| tree.node(info.node).unwrap().name().to_owned())
            .collect()
    }

    #[test]
    fn partitions_by_category_in_depth_first_order() {
        let tree = selector(
            "root",
            vec![
                task("strike"),
                sequence("inner", vec![task("block"), task("slash")]),
                task("guard"),
                task("heal"),
            ],
        )
        .build("t")
        .unwrap();

        let mut store = NodeMetadataStore::default();
        tag(&mut store, &tree, "strike", "Offensive Action");
        tag(&mut store, &tree, "block", "defensive action");
        tag(&mut store, &tree, "slash", "OFFENSIVE ACTION");
        tag(&mut store, &tree, "guard", "Defensive Action");
        tag(&mut store, &tree, "heal", "Supporting Action");

        let matches = collect_matches(
            &tree,
            TREE,
            tree.root().unwrap(),
            AbilityCategory::Offensive,
            &store,
        );
        assert_eq!(names(&tree, &matches.same), vec!["strike", "slash"]);
        assert_eq!(names(&tree, &matches.opposite), vec!["block", "guard"]);

        let slash = matches.same[1];
        assert_eq!(slash.parent, tree.find("inner").unwrap());
        assert_eq!(slash.child_index, 1);
    }

    #[test]
    fn supporting_uses_offensive_as_opposite() {
        let tree = selector("root", vec![task("heal"), task("strike"), task("block")])
            .build("t")
            .unwrap();
        let mut store = NodeMetadataStore::default();
        tag(&mut store, &tree, "heal", "Supporting Action");
        tag(&mut store, &tree, "strike", "Offensive Action");
        tag(&mut store, &tree, "block", "Defensive Action");

        let matches = collect_matches(
            &tree,
            TREE,
            tree.root().unwrap(),
            AbilityCategory::Supporting,
            &store,
        );
        assert_eq!(names(&tree, &matches.same), vec!["heal"]);
        assert_eq!(names(&tree, &matches.opposite), vec!["strike"]);
    }

    #[test]
    fn non_dynamic_tasks_are_ignored() {
        let tree = selector("root", vec![task("strike"), task("block")])
            .build("t")
            .unwrap();
        let mut store = NodeMetadataStore::default();
        tag(&mut store, &tree, "strike", "Offensive Action");
        store.set_category_label(NodeKey::new(TREE, tree.find("block").unwrap()), "Defensive Action")
            .unwrap();

        let matches = collect_matches(
            &tree,
            TREE,
            tree.root().unwrap(),
            AbilityCategory::Offensive,
            &store,
        );
        assert_eq!(matches.same.len(), 1);
        assert!(matches.opposite.is_empty());
    }

    #[test]
    fn scan_is_limited_to_the_given_subtree() {
        let tree = selector(
            "root",
            vec![task("outside"), sequence("inner", vec![task("inside")])],
        )
        .build("t")
        .unwrap();
        let mut store = NodeMetadataStore::default();
        tag(&mut store, &tree, "outside", "Offensive Action");
        tag(&mut store, &tree, "inside", "Offensive Action");

        let inner = tree.find("inner").unwrap();
        let matches = collect_matches(&tree, TREE, inner, AbilityCategory::Offensive, &store);
        assert_eq!(names(&tree, &matches.same), vec!["inside"]);
    }
}
