//! Error types for agents and the round orchestrator.

use std::time::Duration;

use thiserror::Error;

use crate::agent::ActionKind;

/// Result type for agent actions.
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type for running a scene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Why an agent failed to produce a response.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// The action exceeded its configured timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The agent's backend reported a failure.
    #[error("{0}")]
    Failed(String),

    /// A scripted agent ran out of queued responses.
    #[error("no scripted response left")]
    Exhausted,
}

/// Errors that stop a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Game rule error, including unsupported roster sizes.
    #[error("{0}")]
    Core(#[from] spy_core::SpyError),

    /// An agent action failed while debug mode was on.
    #[error("{player} failed to {action}: {source}")]
    Agent {
        /// Name of the failing player.
        player: String,
        /// Action that failed.
        action: ActionKind,
        /// Underlying agent error.
        source: AgentError,
    },
}
