//! Messages exchanged between the moderator and players.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::key::Key;
use crate::moderator::{GameOverSummary, InitSummary, PredictionSummary, VoteSummary};
use crate::roster::{PlayerId, Profile};

/// Unique identifier for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A sender or receiver of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Participant {
    /// The game moderator.
    Moderator,
    /// A seated player.
    Player(PlayerId),
}

/// Typed payload of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    /// Role and key assignment, for the moderator only.
    InitSummary(InitSummary),
    /// Game rules announcement.
    Rules,
    /// Player and role count announcement.
    Start,
    /// `None` for a Blank.
    KeyAssignment {
        /// The dealt key.
        key: Option<Key>,
    },
    /// Request to describe one's key.
    AskForDescription,
    /// The author's description leaked their key.
    Warning,
    /// Request to guess the Spies and Blanks.
    AskForPrediction,
    /// Parsed predictions beside the truth.
    PredictionSummary(PredictionSummary),
    /// Request to vote one player out.
    AskForVote {
        /// Names that may be voted for.
        targets: Vec<String>,
    },
    /// Tally and outcome of a voting sub-round.
    VoteSummary(VoteSummary),
    /// Result of a game-over check.
    GameOver(GameOverSummary),
    /// A player's description of their key.
    Description,
    /// A player's role prediction.
    Prediction,
    /// A player's vote.
    Vote,
}

/// One message in a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id, also used for log references.
    pub id: MessageId,
    /// Who sent the message.
    pub sender: Participant,
    /// Display name of the sender.
    pub sender_name: String,
    /// Who may see the message.
    pub receivers: Vec<Participant>,
    /// Rendered text as players read it.
    pub text: String,
    /// Structured payload.
    pub body: MessageBody,
}

/// Display name of the moderator.
pub const MODERATOR_NAME: &str = "Moderator";

impl Message {
    /// A message sent by the moderator.
    pub fn from_moderator(receivers: Vec<Participant>, text: String, body: MessageBody) -> Self {
        Self {
            id: MessageId::new(),
            sender: Participant::Moderator,
            sender_name: MODERATOR_NAME.to_string(),
            receivers,
            text,
            body,
        }
    }

    /// A message sent by a player.
    pub fn from_player(
        author: &Profile,
        receivers: Vec<Participant>,
        text: String,
        body: MessageBody,
    ) -> Self {
        Self {
            id: MessageId::new(),
            sender: Participant::Player(author.id),
            sender_name: author.name.clone(),
            receivers,
            text,
            body,
        }
    }

    /// Whether `who` sent or received this message.
    pub fn is_visible_to(&self, who: Participant) -> bool {
        self.sender == who || self.receivers.contains(&who)
    }

    /// Same content under a new id, addressed to different receivers.
    pub fn republish(&self, receivers: Vec<Participant>) -> Self {
        Self {
            id: MessageId::new(),
            receivers,
            ..self.clone()
        }
    }

    /// The key carried by a key assignment, if any.
    pub fn assigned_key(&self) -> Option<&Key> {
        match &self.body {
            MessageBody::KeyAssignment { key } => key.as_ref(),
            _ => None,
        }
    }

    /// Text with the key placeholder replaced by the carried key.
    ///
    /// Only the receiver of a key assignment should call this; the logged
    /// `text` keeps the placeholder.
    pub fn private_text(&self, placeholder: &str) -> String {
        match self.assigned_key() {
            Some(key) if !placeholder.is_empty() => {
                self.text.replace(placeholder, &key.to_string())
            }
            _ => self.text.clone(),
        }
    }
}
