//! Session orchestration for usage-triggered behavior tree reordering.
//!
//! This crate wires the pure decision logic of `dbt-core` into a session
//! that owns registered trees, node metadata, usage counters and an event
//! bus. Abilities are wrapped in [`UsageTracked`] so every activation runs
//! the count, scan, swap and reset pipeline synchronously.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the context object with explicit init/teardown
//! - [`ability`] defines the ability seam and the usage-tracking decorator
//! - [`events`] provides the topic-based event bus
//! - [`scenario`] installs and replays content-defined scenarios
pub mod ability;
pub mod config;
pub mod error;
pub mod events;
pub mod scenario;
pub mod session;

mod activation;

pub use ability::{AbilityBehavior, ActivationOutcome, ActivationPhase, UsageTracked};
pub use activation::{ScanSummary, TreeSwap};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use scenario::{ReplayReport, ScenarioRunner};
pub use session::{RegisteredTree, Session};
