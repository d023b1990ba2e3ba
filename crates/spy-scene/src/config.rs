//! Configuration for running one or more games.

use std::time::Duration;

use spy_core::GameConfig;

use crate::agent::ActionKind;

/// How players take their turn describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescribeOrder {
    /// Everyone describes at once.
    #[default]
    Concurrent,
    /// One at a time, each seeing earlier descriptions.
    Sequential,
}

/// How the speak order is chosen each game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeakOrder {
    /// Fresh shuffle every game.
    #[default]
    Shuffled,
    /// Shuffled, then Blanks moved into the latter half.
    BlanksLate,
}

/// Optional timeout per action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionTimeouts {
    /// Limit for receiving the key.
    pub receive_key: Option<Duration>,
    /// Limit for each description attempt.
    pub describe: Option<Duration>,
    /// Limit for role predictions.
    pub predict: Option<Duration>,
    /// Limit for votes.
    pub vote: Option<Duration>,
}

impl ActionTimeouts {
    /// The same timeout for every action.
    pub fn uniform(limit: Duration) -> Self {
        Self {
            receive_key: Some(limit),
            describe: Some(limit),
            predict: Some(limit),
            vote: Some(limit),
        }
    }

    /// Timeout for one action kind.
    pub fn get(&self, kind: ActionKind) -> Option<Duration> {
        match kind {
            ActionKind::ReceiveKey => self.receive_key,
            ActionKind::Describe => self.describe,
            ActionKind::Predict => self.predict,
            ActionKind::Vote => self.vote,
        }
    }
}

/// Configuration for a scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Rules of each game.
    pub game: GameConfig,
    /// Games to play back to back.
    pub num_games: u32,
    /// Per-action timeouts.
    pub timeouts: ActionTimeouts,
    /// Propagate agent failures instead of substituting defaults.
    pub debug_mode: bool,
    /// Concurrent or sequential descriptions.
    pub describe_order: DescribeOrder,
    /// How seats are ordered each game.
    pub speak_order: SpeakOrder,
    /// Total tries a player gets to describe without leaking their key.
    pub description_attempts: u32,
    /// Voting sub-rounds before a tie is forced to resolve.
    pub vote_patience: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            num_games: 1,
            timeouts: ActionTimeouts::default(),
            debug_mode: false,
            describe_order: DescribeOrder::Concurrent,
            speak_order: SpeakOrder::Shuffled,
            description_attempts: 3,
            vote_patience: 3,
        }
    }
}

impl SceneConfig {
    /// Set the game rules.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Set the number of games (at least 1).
    pub fn with_games(mut self, num_games: u32) -> Self {
        self.num_games = num_games.max(1);
        self
    }

    /// Set per-action timeouts.
    pub fn with_timeouts(mut self, timeouts: ActionTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Propagate agent failures instead of substituting defaults.
    pub fn with_debug(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    /// Set how players take turns describing.
    pub fn with_describe_order(mut self, order: DescribeOrder) -> Self {
        self.describe_order = order;
        self
    }

    /// Set how seats are ordered each game.
    pub fn with_speak_order(mut self, order: SpeakOrder) -> Self {
        self.speak_order = order;
        self
    }

    /// Set the description attempts (at least 1).
    pub fn with_description_attempts(mut self, attempts: u32) -> Self {
        self.description_attempts = attempts.max(1);
        self
    }

    /// Set the voting sub-rounds allowed before a tie is forced.
    pub fn with_vote_patience(mut self, patience: u32) -> Self {
        self.vote_patience = patience;
        self
    }
}
