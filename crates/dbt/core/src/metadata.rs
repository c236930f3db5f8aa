//! Designer-configured node metadata.
//!
//! The store replaces the editor property panels: it records, per tree node,
//! the limit change threshold, whether the node takes part in dynamic
//! reordering, and its category label. It also keeps per-controller settings.
//! A store belongs to one session and is dropped (or [`clear`](NodeMetadataStore::clear)ed)
//! with it.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::{AbilityCategory, ControllerId, CoreError, DbtConfig, NodeKey, TreeId};

/// Resolved metadata of one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeMetadata {
    /// Usage threshold; `<= 0` means inactive.
    pub limit_change: i32,
    pub is_dynamic: bool,
    pub category: String,
}

impl NodeMetadata {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.limit_change > 0
    }
}

/// Per-controller switches from the AI controller panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerSettings {
    /// Trees of disabled controllers are ignored by scans.
    pub dynamic_enabled: bool,
    pub time_limit_secs: u32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            dynamic_enabled: true,
            time_limit_secs: 0,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct NodeEntry {
    limit_change: Option<i32>,
    is_dynamic: bool,
    category: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NodeMetadataStore {
    nodes: HashMap<NodeKey, NodeEntry>,
    controllers: HashMap<ControllerId, ControllerSettings>,
    default_category: AbilityCategory,
    max_time_limit_secs: u32,
}

impl NodeMetadataStore {
    pub fn new(config: &DbtConfig) -> Self {
        Self {
            nodes: HashMap::new(),
            controllers: HashMap::new(),
            default_category: config.default_category,
            max_time_limit_secs: config.max_time_limit_secs,
        }
    }

    // ===== limit change =====

    pub fn set_limit_change(&mut self, key: NodeKey, limit_change: i32) {
        self.nodes.entry(key).or_default().limit_change = Some(limit_change);
        info!(target: "dbt::metadata", node = %key, limit_change, "Limit change set");
    }

    /// Configured limit change, `0` when unset.
    pub fn limit_change(&self, key: NodeKey) -> i32 {
        self.nodes
            .get(&key)
            .and_then(|entry| entry.limit_change)
            .unwrap_or(0)
    }

    pub fn has_limit_change(&self, key: NodeKey) -> bool {
        self.nodes
            .get(&key)
            .is_some_and(|entry| entry.limit_change.is_some())
    }

    // ===== dynamic flag and category =====

    pub fn set_dynamic(&mut self, key: NodeKey, is_dynamic: bool) {
        self.nodes.entry(key).or_default().is_dynamic = is_dynamic;
        debug!(target: "dbt::metadata", node = %key, is_dynamic, "Dynamic flag set");
    }

    pub fn is_dynamic(&self, key: NodeKey) -> bool {
        self.nodes.get(&key).is_some_and(|entry| entry.is_dynamic)
    }

    pub fn set_category(&mut self, key: NodeKey, category: AbilityCategory) {
        self.nodes.entry(key).or_default().category = Some(category.label().to_owned());
        debug!(target: "dbt::metadata", node = %key, %category, "Category set");
    }

    /// Sets the category from a label, rejecting labels that are not a known category.
    pub fn set_category_label(&mut self, key: NodeKey, label: &str) -> Result<(), CoreError> {
        let category = label
            .trim()
            .parse::<AbilityCategory>()
            .map_err(|_| CoreError::UnknownCategory(label.to_owned()))?;
        self.set_category(key, category);
        Ok(())
    }

    /// Category label of the node, the default category's label when unset.
    pub fn category(&self, key: NodeKey) -> &str {
        self.nodes
            .get(&key)
            .and_then(|entry| entry.category.as_deref())
            .unwrap_or_else(|| self.default_category.label())
    }

    pub fn metadata(&self, key: NodeKey) -> NodeMetadata {
        NodeMetadata {
            limit_change: self.limit_change(key),
            is_dynamic: self.is_dynamic(key),
            category: self.category(key).to_owned(),
        }
    }

    // ===== controllers =====

    pub fn set_controller_dynamic(&mut self, controller: ControllerId, enabled: bool) {
        self.controllers.entry(controller).or_default().dynamic_enabled = enabled;
        info!(
            target: "dbt::metadata",
            %controller,
            enabled,
            "Controller dynamic behavior flag set"
        );
    }

    /// Sets the controller time limit, clamped to the configured maximum.
    pub fn set_controller_time_limit(&mut self, controller: ControllerId, secs: u32) {
        let clamped = secs.min(self.max_time_limit_secs);
        self.controllers.entry(controller).or_default().time_limit_secs = clamped;
        debug!(
            target: "dbt::metadata",
            %controller,
            requested = secs,
            time_limit_secs = clamped,
            "Controller time limit set"
        );
    }

    pub fn set_controller(&mut self, controller: ControllerId, settings: ControllerSettings) {
        self.set_controller_dynamic(controller, settings.dynamic_enabled);
        self.set_controller_time_limit(controller, settings.time_limit_secs);
    }

    pub fn controller(&self, controller: ControllerId) -> ControllerSettings {
        self.controllers
            .get(&controller)
            .copied()
            .unwrap_or_default()
    }

    // ===== lifecycle =====

    /// Drops every node entry belonging to `tree`.
    pub fn remove_tree(&mut self, tree: TreeId) {
        self.nodes.retain(|key, _| key.tree != tree);
        debug!(target: "dbt::metadata", %tree, "Tree metadata removed");
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.controllers.clear();
        info!(target: "dbt::metadata", "All node data cleared");
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeMetadataStore {
    fn default() -> Self {
        Self::new(&DbtConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use behavior_tree::NodeId;

    use super::*;

    fn key(node: u32) -> NodeKey {
        NodeKey::new(TreeId(0), NodeId(node))
    }

    #[test]
    fn unset_values_read_as_inactive_defaults() {
        let store = NodeMetadataStore::default();
        let meta = store.metadata(key(3));

        assert_eq!(meta.limit_change, 0);
        assert!(!meta.is_active());
        assert!(!meta.is_dynamic);
        assert_eq!(meta.category, "Offensive Action");
        assert!(!store.has_limit_change(key(3)));
    }

    #[test]
    fn zero_limit_is_recorded_but_inactive() {
        let mut store = NodeMetadataStore::default();
        store.set_limit_change(key(1), 0);

        assert!(store.has_limit_change(key(1)));
        assert!(!store.metadata(key(1)).is_active());
    }

    #[test]
    fn category_label_must_be_known() {
        let mut store = NodeMetadataStore::default();
        assert!(store.set_category_label(key(1), "defensive action").is_ok());
        assert_eq!(store.category(key(1)), "Defensive Action");
        assert_eq!(
            store.set_category_label(key(1), "Sneaky"),
            Err(CoreError::UnknownCategory("Sneaky".to_owned()))
        );
        assert_eq!(store.category(key(1)), "Defensive Action");
    }

    #[test]
    fn time_limit_is_clamped() {
        let mut store = NodeMetadataStore::default();
        store.set_controller_time_limit(ControllerId(1), 10_000);
        assert_eq!(store.controller(ControllerId(1)).time_limit_secs, 3600);
        assert!(store.controller(ControllerId(1)).dynamic_enabled);
        assert!(store.controller(ControllerId(2)).dynamic_enabled);
    }

    #[test]
    fn remove_tree_only_drops_that_tree() {
        let mut store = NodeMetadataStore::default();
        store.set_limit_change(key(1), 3);
        store.set_limit_change(NodeKey::new(TreeId(1), NodeId(1)), 4);

        store.remove_tree(TreeId(0));
        assert_eq!(store.limit_change(key(1)), 0);
        assert_eq!(store.limit_change(NodeKey::new(TreeId(1), NodeId(1))), 4);

        store.clear();
        assert!(store.is_empty());
    }
}
