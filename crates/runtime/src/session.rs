//! The session context object.
//!
//! A [`Session`] owns everything the decision engine shares across ability
//! instances: registered trees, the node metadata store, the usage ledger and
//! the event bus. It is created explicitly with [`Session::new`] and torn
//! down with [`Session::shutdown`]; there is no process-wide instance.

use behavior_tree::{BehaviorTree, NodeId};
use tokio::sync::broadcast;
use tracing::{debug, info};

use dbt_core::{
    AbilityCategory, ControllerId, ControllerSettings, CoreError, EntityId, NodeKey,
    NodeMetadataStore, ThresholdEvaluator, TreeId, UsageLedger,
};

use crate::events::{Event, EventBus, Topic, UsageEvent};
use crate::{Result, RuntimeConfig, RuntimeError};

/// A tree driven by one AI controller.
#[derive(Debug)]
pub struct RegisteredTree {
    pub id: TreeId,
    pub controller: ControllerId,
    pub tree: BehaviorTree,
}

pub struct Session {
    pub(crate) config: RuntimeConfig,
    pub(crate) store: NodeMetadataStore,
    pub(crate) ledger: UsageLedger,
    pub(crate) evaluator: ThresholdEvaluator,
    pub(crate) trees: Vec<RegisteredTree>,
    pub(crate) events: EventBus,
    next_tree: u32,
    open: bool,
}

impl Session {
    pub fn new(config: RuntimeConfig) -> Self {
        info!(
            target: "runtime::session",
            reset_policy = %config.dbt.reset_policy,
            "Session started"
        );
        Self {
            store: NodeMetadataStore::new(&config.dbt),
            ledger: UsageLedger::new(),
            evaluator: ThresholdEvaluator::new(config.dbt.reset_policy),
            trees: Vec::new(),
            events: EventBus::with_capacity(config.event_buffer_size),
            next_tree: 0,
            open: true,
            config,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Releases all session data. Later registrations fail; activations become no-ops.
    pub fn shutdown(&mut self) {
        if !self.open {
            return;
        }
        self.store.clear();
        self.ledger = UsageLedger::new();
        self.trees.clear();
        self.open = false;
        info!(target: "runtime::session", "Session shut down");
    }

    // ===== trees =====

    /// Registers the tree run by `controller`. Each controller runs one tree.
    pub fn register_tree(&mut self, controller: ControllerId, tree: BehaviorTree) -> Result<TreeId> {
        if !self.open {
            return Err(RuntimeError::SessionClosed);
        }
        if self.trees.iter().any(|t| t.controller == controller) {
            return Err(RuntimeError::DuplicateController(controller));
        }

        let id = TreeId(self.next_tree);
        self.next_tree += 1;
        info!(
            target: "runtime::session",
            tree = %id,
            %controller,
            name = tree.name(),
            nodes = tree.len(),
            "Tree registered"
        );
        self.trees.push(RegisteredTree {
            id,
            controller,
            tree,
        });
        Ok(id)
    }

    /// Removes a tree together with its node metadata.
    pub fn unregister_tree(&mut self, id: TreeId) -> Result<BehaviorTree> {
        let index = self
            .trees
            .iter()
            .position(|t| t.id == id)
            .ok_or(RuntimeError::UnknownTree(id))?;
        self.store.remove_tree(id);
        debug!(target: "runtime::session", tree = %id, "Tree unregistered");
        Ok(self.trees.remove(index).tree)
    }

    pub fn tree(&self, id: TreeId) -> Option<&BehaviorTree> {
        self.registered(id).map(|t| &t.tree)
    }

    pub fn tree_of(&self, controller: ControllerId) -> Option<&RegisteredTree> {
        self.trees.iter().find(|t| t.controller == controller)
    }

    pub fn trees(&self) -> impl Iterator<Item = &RegisteredTree> + '_ {
        self.trees.iter()
    }

    fn registered(&self, id: TreeId) -> Option<&RegisteredTree> {
        self.trees.iter().find(|t| t.id == id)
    }

    // ===== metadata =====

    pub fn metadata(&self) -> &NodeMetadataStore {
        &self.store
    }

    /// Unchecked access to the store. Prefer the validated setters below.
    pub fn metadata_mut(&mut self) -> &mut NodeMetadataStore {
        &mut self.store
    }

    /// Sets the limit change of a node of a registered tree.
    pub fn set_limit_change(&mut self, tree: TreeId, node: NodeId, limit_change: i32) -> Result<()> {
        self.require_node(tree, node)?;
        self.store.set_limit_change(NodeKey::new(tree, node), limit_change);
        Ok(())
    }

    /// Flags a task node as dynamic and assigns its category.
    pub fn set_dynamic_task(
        &mut self,
        tree: TreeId,
        node: NodeId,
        category: AbilityCategory,
    ) -> Result<()> {
        let is_task = self.require_node(tree, node)?;
        if !is_task {
            return Err(CoreError::NotATask { tree, node }.into());
        }
        let key = NodeKey::new(tree, node);
        self.store.set_dynamic(key, true);
        self.store.set_category(key, category);
        Ok(())
    }

    pub fn set_controller(&mut self, controller: ControllerId, settings: ControllerSettings) {
        self.store.set_controller(controller, settings);
    }

    /// Returns whether the node is a task.
    fn require_node(&self, tree: TreeId, node: NodeId) -> Result<bool> {
        let registered = self.registered(tree).ok_or(RuntimeError::UnknownTree(tree))?;
        registered
            .tree
            .node(node)
            .map(|n| n.is_task())
            .ok_or_else(|| CoreError::UnknownNode { tree, node }.into())
    }

    // ===== usage =====

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Increments the per-entity counter and publishes [`UsageEvent::AbilityUsed`].
    pub fn record_use(&mut self, entity: EntityId, ability: &str) -> u32 {
        let count = self.ledger.record_use(entity, ability);
        self.events.publish(Event::Usage(UsageEvent::AbilityUsed {
            entity,
            ability: ability.to_owned(),
            count,
        }));
        count
    }

    pub fn reset_usage(&mut self, entity: EntityId) {
        self.ledger.reset(entity);
    }

    // ===== events =====

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.events.subscribe(topic)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
