//! A deterministic agent that replays queued responses.
//!
//! Used by tests and by embedders that want to drive a seat by hand.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use spy_core::{Key, Locale, Message};

use crate::agent::{ActionKind, Agent, Turn};
use crate::error::{AgentError, AgentResult};

/// One queued reaction.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with this text.
    Reply(String),
    /// Fail with this reason.
    Fail(String),
    /// Sleep, then reply.
    Delayed(Duration, String),
}

/// What a scripted agent was shown, for assertions.
#[derive(Debug, Clone, Default)]
pub struct Observed {
    /// Assignment texts with the placeholder substituted, one per game.
    pub keys: Vec<String>,
    /// Keys carried by each assignment; `None` for a Blank.
    pub assigned: Vec<Option<Key>>,
    /// Action kinds in the order they were requested.
    pub actions: Vec<ActionKind>,
    /// Candidate lists seen by each vote request.
    pub vote_candidates: Vec<Vec<String>>,
    /// History lengths seen by each describe request.
    pub describe_history: Vec<usize>,
    /// Number of resets received.
    pub resets: usize,
}

/// An agent that replays queued responses per action kind.
///
/// Running out of responses is an [`AgentError::Exhausted`] failure unless a
/// fallback reply is set.
pub struct ScriptedAgent {
    name: String,
    queues: HashMap<ActionKind, VecDeque<Scripted>>,
    fallback: HashMap<ActionKind, String>,
    observed: Arc<Mutex<Observed>>,
}

impl ScriptedAgent {
    /// An agent with empty queues and no fallbacks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queues: HashMap::new(),
            fallback: HashMap::new(),
            observed: Arc::new(Mutex::new(Observed::default())),
        }
    }

    /// Queue a reaction for an action kind.
    pub fn push(mut self, kind: ActionKind, step: Scripted) -> Self {
        self.queues.entry(kind).or_default().push_back(step);
        self
    }

    /// Reply used whenever the queue for `kind` is empty.
    pub fn fallback(mut self, kind: ActionKind, reply: impl Into<String>) -> Self {
        self.fallback.insert(kind, reply.into());
        self
    }

    /// Handle to what the agent observes while it runs inside a scene.
    pub fn observer(&self) -> Arc<Mutex<Observed>> {
        Arc::clone(&self.observed)
    }

    fn observe(&self, f: impl FnOnce(&mut Observed)) {
        if let Ok(mut seen) = self.observed.lock() {
            f(&mut seen);
        }
    }

    async fn next(&mut self, kind: ActionKind) -> AgentResult<String> {
        self.observe(|o| o.actions.push(kind));
        let step = self.queues.get_mut(&kind).and_then(VecDeque::pop_front);
        match step {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Fail(reason)) => Err(AgentError::Failed(reason)),
            Some(Scripted::Delayed(wait, text)) => {
                tokio::time::sleep(wait).await;
                Ok(text)
            }
            None => self
                .fallback
                .get(&kind)
                .cloned()
                .ok_or(AgentError::Exhausted),
        }
    }
}

#[async_trait::async_trait]
impl Agent for ScriptedAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive_key(&mut self, assignment: &Message, locale: &Locale) -> AgentResult<()> {
        let text = assignment.private_text(&locale.key_placeholder);
        let key = assignment.assigned_key().cloned();
        self.observe(|o| {
            o.keys.push(text);
            o.assigned.push(key);
        });
        let queued = self
            .queues
            .get(&ActionKind::ReceiveKey)
            .is_some_and(|q| !q.is_empty());
        if queued {
            self.next(ActionKind::ReceiveKey).await?;
        }
        Ok(())
    }

    async fn describe_key(&mut self, turn: Turn<'_>) -> AgentResult<String> {
        let seen = turn.history.len();
        self.observe(|o| o.describe_history.push(seen));
        self.next(ActionKind::Describe).await
    }

    async fn predict_role(&mut self, _turn: Turn<'_>) -> AgentResult<String> {
        self.next(ActionKind::Predict).await
    }

    async fn vote(&mut self, turn: Turn<'_>) -> AgentResult<String> {
        let candidates = turn.candidates.to_vec();
        self.observe(|o| o.vote_candidates.push(candidates));
        self.next(ActionKind::Vote).await
    }

    async fn reset(&mut self) {
        self.observe(|o| o.resets += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spy_core::Profile;

    #[tokio::test]
    async fn replays_in_order_then_exhausts() {
        let mut agent = ScriptedAgent::new("Ann")
            .push(ActionKind::Vote, Scripted::Reply("vote: Bo".into()))
            .push(ActionKind::Vote, Scripted::Reply("vote: Cy".into()))
            .push(ActionKind::Vote, Scripted::Fail("backend down".into()));
        let me = Profile::new("Ann");
        let locale = Locale::english();
        let turn = Turn {
            me: &me,
            history: &[],
            candidates: &[],
            locale: &locale,
        };
        assert_eq!(agent.vote(turn).await.unwrap(), "vote: Bo");
        assert_eq!(agent.vote(turn).await.unwrap(), "vote: Cy");
        assert!(matches!(agent.vote(turn).await, Err(AgentError::Failed(_))));
        assert!(matches!(agent.vote(turn).await, Err(AgentError::Exhausted)));
        assert_eq!(agent.observer().lock().unwrap().actions.len(), 4);
    }

    #[tokio::test]
    async fn fallback_fills_empty_queue() {
        let mut agent = ScriptedAgent::new("Ann").fallback(ActionKind::Predict, "spy: [Bo]");
        let me = Profile::new("Ann");
        let locale = Locale::english();
        let turn = Turn {
            me: &me,
            history: &[],
            candidates: &[],
            locale: &locale,
        };
        assert_eq!(agent.predict_role(turn).await.unwrap(), "spy: [Bo]");
        assert_eq!(agent.predict_role(turn).await.unwrap(), "spy: [Bo]");
    }
}
