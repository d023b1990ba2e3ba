//! The capability interface every player backend implements.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use spy_core::{Locale, Message, Profile};

use crate::error::{AgentError, AgentResult};

/// The kinds of action an agent can be asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Receiving the key assignment.
    ReceiveKey,
    /// Describing the key.
    Describe,
    /// Predicting roles.
    Predict,
    /// Voting.
    Vote,
}

impl ActionKind {
    /// Every action kind.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::ReceiveKey,
        ActionKind::Describe,
        ActionKind::Predict,
        ActionKind::Vote,
    ];
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReceiveKey => write!(f, "receive key"),
            Self::Describe => write!(f, "describe"),
            Self::Predict => write!(f, "predict"),
            Self::Vote => write!(f, "vote"),
        }
    }
}

/// What an agent sees when asked to act.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    /// The acting player.
    pub me: &'a Profile,
    /// Messages visible to the player so far, oldest first.
    pub history: &'a [Message],
    /// Names the response may refer to: alive players, or vote targets.
    pub candidates: &'a [String],
    /// Language of prompts and markers.
    pub locale: &'a Locale,
}

/// A player backend: a language model, a human, or a scripted bot.
///
/// The orchestrator depends only on this trait. Failures are returned, never
/// panicked, and the orchestrator decides whether to substitute a default.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Display name, unique within a scene.
    fn name(&self) -> &str;

    /// Private key assignment. Substitute the locale's placeholder to read the key.
    async fn receive_key(&mut self, assignment: &Message, locale: &Locale) -> AgentResult<()>;

    /// One-sentence description of the key.
    async fn describe_key(&mut self, turn: Turn<'_>) -> AgentResult<String>;

    /// Free text naming suspected Spies and Blanks after the locale markers.
    async fn predict_role(&mut self, turn: Turn<'_>) -> AgentResult<String>;

    /// Free text naming one of `turn.candidates` after the vote marker.
    async fn vote(&mut self, turn: Turn<'_>) -> AgentResult<String>;

    /// Forget everything from the previous game.
    async fn reset(&mut self);
}

/// Await an action, failing with [`AgentError::Timeout`] past `limit`.
pub async fn with_timeout<T, F>(limit: Option<Duration>, action: F) -> AgentResult<T>
where
    F: Future<Output = AgentResult<T>>,
{
    match limit {
        Some(d) => tokio::time::timeout(d, action)
            .await
            .map_err(|_| AgentError::Timeout(d))?,
        None => action.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timeout_turns_slow_action_into_error() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, AgentError>(1)
        };
        let result = with_timeout(Some(Duration::from_millis(10)), slow).await;
        assert!(matches!(result, Err(AgentError::Timeout(_))));
    }

    #[tokio::test]
    async fn no_limit_waits_for_result() {
        let result = with_timeout(None, async { Ok::<_, AgentError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }
}
