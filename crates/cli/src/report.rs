//! Plain-text replay report.

use behavior_tree::{BehaviorTree, NodeId};
use dbt_core::{NodeKey, NodeMetadataStore, TreeId};
use dbt_runtime::{ReplayReport, ScenarioRunner};

pub fn print(runner: &ScenarioRunner, replay: &ReplayReport) {
    let session = runner.session();

    println!(
        "Replayed {} activations: {} pairs swapped, {} resets, {} skipped",
        replay.activations, replay.pairs_swapped, replay.resets, replay.skipped
    );
    println!(
        "Controllers: {}",
        runner.controller_names().collect::<Vec<_>>().join(", ")
    );

    for registered in session.trees() {
        let settings = session.metadata().controller(registered.controller);
        let state = if settings.dynamic_enabled { "dynamic" } else { "static" };
        println!();
        println!(
            "{} ({}, {})",
            registered.tree.name(),
            registered.controller,
            state
        );
        if let Some(root) = registered.tree.root() {
            print_node(&registered.tree, registered.id, root, session.metadata(), 1);
        }
    }

    let mut entities: Vec<_> = session.ledger().entities().collect();
    entities.sort();
    if !entities.is_empty() {
        println!();
        println!("Usage counters");
    }
    for entity in entities {
        for (ability, count) in session.ledger().sorted_stats(entity) {
            println!("  {entity} {ability}: {count}");
        }
        session.ledger().log_stats(entity);
    }
}

fn print_node(
    tree: &BehaviorTree,
    tree_id: TreeId,
    id: NodeId,
    store: &NodeMetadataStore,
    depth: usize,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let meta = store.metadata(NodeKey::new(tree_id, id));
    let indent = "  ".repeat(depth);

    match node.composite_kind() {
        Some(kind) if meta.limit_change > 0 => {
            println!("{indent}{} [{}, limit {}]", node.name(), kind.as_str(), meta.limit_change)
        }
        Some(kind) => println!("{indent}{} [{}]", node.name(), kind.as_str()),
        None if meta.is_dynamic => println!("{indent}{} ({})", node.name(), meta.category),
        None => println!("{indent}{}", node.name()),
    }

    for &child in tree.children(id) {
        print_node(tree, tree_id, child, store, depth + 1);
    }
}
