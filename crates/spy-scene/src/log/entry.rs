//! The audit record written for every message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spy_core::{Message, MessageId};
use uuid::Uuid;

/// One immutable audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Game this entry belongs to.
    pub game_id: Uuid,
    /// 0 during setup, then the round number.
    pub round_id: u32,
    /// Prior messages visible to the sender. `None` for the moderator.
    pub references: Option<Vec<MessageId>>,
    /// The recorded message.
    pub response: Message,
    /// Receiver names at the time of sending.
    pub receivers: Vec<String>,
    /// Short description of the step, such as `ask for vote`.
    pub log_msg: String,
    /// Groups related messages, such as a description and its retries.
    pub action_chain: Option<String>,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
}
