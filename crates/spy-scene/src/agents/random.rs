//! A seeded agent that plays without a model.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use spy_core::{Key, Locale, Message};

use crate::agent::{Agent, Turn};
use crate::error::AgentResult;

/// Descriptions vague enough to fit any key.
const CANNED: &[&str] = &[
    "You would recognize it the moment you saw it.",
    "Most people have an opinion about it.",
    "I have come across it more than once.",
    "It is more common than you might think.",
    "Some like it a lot, some not at all.",
];

/// A bot that describes vaguely and accuses at random.
pub struct RandomAgent {
    name: String,
    seed: u64,
    rng: StdRng,
    key: Option<Key>,
    key_text: Option<String>,
}

impl RandomAgent {
    /// A random agent whose choices follow `seed`.
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            seed,
            rng: StdRng::seed_from_u64(seed),
            key: None,
            key_text: None,
        }
    }

    /// The key this agent was given, if any.
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// The assignment text as the agent read it, placeholder substituted.
    pub fn key_text(&self) -> Option<&str> {
        self.key_text.as_deref()
    }

    /// A random candidate other than `me`, falling back to any candidate.
    fn pick<'c>(&mut self, me: &str, candidates: &'c [String]) -> Option<&'c String> {
        let others: Vec<&String> = candidates.iter().filter(|c| *c != me).collect();
        match others.choose(&mut self.rng) {
            Some(name) => Some(*name),
            None => candidates.choose(&mut self.rng),
        }
    }
}

#[async_trait::async_trait]
impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn receive_key(&mut self, assignment: &Message, locale: &Locale) -> AgentResult<()> {
        self.key = assignment.assigned_key().cloned();
        self.key_text = Some(assignment.private_text(&locale.key_placeholder));
        Ok(())
    }

    async fn describe_key(&mut self, turn: Turn<'_>) -> AgentResult<String> {
        let line = CANNED.choose(&mut self.rng).copied().unwrap_or(CANNED[0]);
        Ok(format!("{line}{}", turn.locale.end_of_speech))
    }

    async fn predict_role(&mut self, turn: Turn<'_>) -> AgentResult<String> {
        let suspect = self
            .pick(&turn.me.name, turn.candidates)
            .cloned()
            .unwrap_or_default();
        Ok(format!(
            "{} [{suspect}]{}",
            turn.locale.spy_marker, turn.locale.end_of_speech
        ))
    }

    async fn vote(&mut self, turn: Turn<'_>) -> AgentResult<String> {
        let target = self
            .pick(&turn.me.name, turn.candidates)
            .cloned()
            .unwrap_or_default();
        Ok(format!(
            "{} {target}{}",
            turn.locale.vote_marker, turn.locale.end_of_speech
        ))
    }

    async fn reset(&mut self) {
        self.key = None;
        self.key_text = None;
        self.seed = self.seed.wrapping_add(1);
        self.rng = StdRng::seed_from_u64(self.seed);
    }
}
