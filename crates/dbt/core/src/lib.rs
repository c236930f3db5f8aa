//! Usage-triggered priority swapping for behavior trees.
//!
//! `dbt-core` holds the pure decision logic: it counts ability usage, keeps
//! designer-configured node metadata, decides when thresholds are reached and
//! reorders task nodes inside an arena [`BehaviorTree`](behavior_tree::BehaviorTree).
//! It has no I/O and no global state; the runtime crate owns the session that
//! ties these pieces together.
//!
//! Components in dependency order:
//! - [`counter`]: per-entity ability usage counts
//! - [`metadata`]: per-node limit, dynamic flag and category
//! - [`threshold`]: swap and reset conditions
//! - [`matcher`]: category matching over task nodes
//! - [`swap`]: pairwise in-place priority exchange
pub mod category;
pub mod config;
pub mod counter;
pub mod error;
pub mod matcher;
pub mod metadata;
pub mod swap;
pub mod threshold;
pub mod types;

pub use category::{AbilityCategory, opposite_label};
pub use config::{DbtConfig, ResetPolicy};
pub use counter::UsageLedger;
pub use error::CoreError;
pub use matcher::{CategoryMatches, collect_matches};
pub use metadata::{ControllerSettings, NodeMetadata, NodeMetadataStore};
pub use swap::{SwapReport, swap_priorities};
pub use threshold::{ThresholdEvaluator, limit_reached};
pub use types::{ControllerId, EntityId, NodeKey, TaskNodeInfo, TreeId};
