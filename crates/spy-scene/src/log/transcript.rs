//! In-memory transcript with JSON-lines and markdown export.

use serde::{Deserialize, Serialize};

use super::LogSink;
use super::entry::LogEntry;

/// A chronological record of every message of every game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<LogEntry>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One JSON object per line.
    pub fn export_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Export as markdown, one section per game and round.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Who is the Spy transcript\n\n");
        let mut game = None;
        let mut round = None;
        let mut game_number = 0;
        for entry in &self.entries {
            if game != Some(entry.game_id) {
                game = Some(entry.game_id);
                round = None;
                game_number += 1;
                out.push_str(&format!("## Game {game_number}\n\n"));
            }
            if round != Some(entry.round_id) {
                round = Some(entry.round_id);
                if entry.round_id == 0 {
                    out.push_str("### Setup\n\n");
                } else {
                    out.push_str(&format!("### Round {}\n\n", entry.round_id));
                }
            }
            let to = if entry.receivers.is_empty() {
                String::from("nobody")
            } else {
                entry.receivers.join(", ")
            };
            out.push_str(&format!(
                "**{}** to {to} *({})*\n\n",
                entry.response.sender_name, entry.log_msg
            ));
            let quoted: Vec<String> = entry
                .response
                .text
                .lines()
                .map(|l| format!("> {l}"))
                .collect();
            out.push_str(&quoted.join("\n"));
            out.push_str("\n\n");
        }
        out
    }
}

impl LogSink for Transcript {
    fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}
