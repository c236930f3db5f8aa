//! Error types surfaced by session setup.
//!
//! Activation never fails; these errors only come from registering trees and
//! configuring metadata, where bad input should be rejected up front.
use thiserror::Error;

use dbt_core::{ControllerId, CoreError, TreeId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} already has a registered tree")]
    DuplicateController(ControllerId),

    #[error("{0} is not registered with this session")]
    UnknownTree(TreeId),

    #[error("session has been shut down")]
    SessionClosed,

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Tree(#[from] behavior_tree::TreeError),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
