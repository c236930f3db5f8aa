//! Serialized content formats.
//!
//! A [`ContentNode`] is a tree node together with the values a designer
//! would set on it: a limit change on composites, a dynamic flag and a
//! category on tasks. Building a [`ControllerSpec`] yields the arena tree and
//! the list of annotations to install into a metadata store once the tree has
//! been registered and has a `TreeId`.

use behavior_tree::{BehaviorTree, CompositeKind, NodeId, TreeError};
use dbt_core::{AbilityCategory, ControllerSettings, EntityId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentNode {
    Composite {
        name: String,
        kind: CompositeKind,
        #[serde(default)]
        limit_change: Option<i32>,
        #[serde(default)]
        children: Vec<ContentNode>,
    },
    Task {
        name: String,
        #[serde(default)]
        dynamic: bool,
        #[serde(default)]
        category: Option<AbilityCategory>,
    },
}

/// Designer values attached to one built node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeAnnotation {
    pub node: NodeId,
    pub limit_change: Option<i32>,
    pub dynamic: bool,
    pub category: Option<AbilityCategory>,
}

/// A built tree plus the annotations collected while building it.
#[derive(Clone, Debug)]
pub struct BuiltTree {
    pub tree: BehaviorTree,
    pub annotations: Vec<NodeAnnotation>,
}

/// An AI controller, its settings and the tree it runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSpec {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub settings: ControllerSettings,
    pub tree_name: String,
    pub root: ContentNode,
}

impl ControllerSpec {
    pub fn build(&self) -> Result<BuiltTree, TreeError> {
        let ContentNode::Composite {
            name,
            kind,
            limit_change,
            children,
        } = &self.root
        else {
            return Err(TreeError::RootMustBeComposite);
        };

        let mut tree = BehaviorTree::new(self.tree_name.clone());
        let root = tree.set_root(name.clone(), *kind)?;
        let mut annotations = Vec::new();
        if limit_change.is_some() {
            annotations.push(NodeAnnotation {
                node: root,
                limit_change: *limit_change,
                dynamic: false,
                category: None,
            });
        }
        for child in children {
            attach(&mut tree, root, child, &mut annotations)?;
        }

        Ok(BuiltTree { tree, annotations })
    }
}

fn attach(
    tree: &mut BehaviorTree,
    parent: NodeId,
    spec: &ContentNode,
    annotations: &mut Vec<NodeAnnotation>,
) -> Result<(), TreeError> {
    match spec {
        ContentNode::Composite {
            name,
            kind,
            limit_change,
            children,
        } => {
            let id = tree.add_composite(parent, name.clone(), *kind)?;
            if limit_change.is_some() {
                annotations.push(NodeAnnotation {
                    node: id,
                    limit_change: *limit_change,
                    dynamic: false,
                    category: None,
                });
            }
            for child in children {
                attach(tree, id, child, annotations)?;
            }
        }
        ContentNode::Task {
            name,
            dynamic,
            category,
        } => {
            let id = tree.add_task(parent, name.clone())?;
            if *dynamic || category.is_some() {
                annotations.push(NodeAnnotation {
                    node: id,
                    limit_change: None,
                    dynamic: *dynamic,
                    category: *category,
                });
            }
        }
    }
    Ok(())
}

/// A usage-tracked ability and its category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub name: String,
    #[serde(default)]
    pub category: AbilityCategory,
}

/// One activation to replay: `entity` uses `ability`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationStep {
    pub entity: EntityId,
    pub ability: String,
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

/// Complete replayable setup: controllers, abilities and an activation script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub controllers: Vec<ControllerSpec>,
    pub abilities: Vec<AbilitySpec>,
    #[serde(default)]
    pub activations: Vec<ActivationStep>,
}

impl Scenario {
    pub fn ability(&self, name: &str) -> Option<&AbilitySpec> {
        self.abilities.iter().find(|ability| ability.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(root: ContentNode) -> ControllerSpec {
        ControllerSpec {
            id: 1,
            name: "guard".into(),
            settings: ControllerSettings::default(),
            tree_name: "guard_bt".into(),
            root,
        }
    }

    #[test]
    fn build_collects_annotations() {
        let spec = controller(ContentNode::Composite {
            name: "root".into(),
            kind: CompositeKind::Selector,
            limit_change: Some(3),
            children: vec![
                ContentNode::Task {
                    name: "strike".into(),
                    dynamic: true,
                    category: Some(AbilityCategory::Offensive),
                },
                ContentNode::Task {
                    name: "idle".into(),
                    dynamic: false,
                    category: None,
                },
            ],
        });

        let built = spec.build().unwrap();
        assert_eq!(built.tree.len(), 3);
        assert_eq!(built.annotations.len(), 2);
        assert_eq!(built.annotations[0].limit_change, Some(3));
        assert_eq!(built.annotations[0].node, built.tree.root().unwrap());
        assert_eq!(built.annotations[1].node, built.tree.find("strike").unwrap());
        assert!(built.annotations[1].dynamic);
    }

    #[test]
    fn task_root_is_rejected() {
        let spec = controller(ContentNode::Task {
            name: "lonely".into(),
            dynamic: false,
            category: None,
        });
        assert!(matches!(spec.build(), Err(TreeError::RootMustBeComposite)));
    }
}
