//! Error types for the game rules.

use thiserror::Error;

use crate::key::KeyModality;
use crate::roster::PlayerId;

/// Result type for game rule operations.
pub type SpyResult<T> = Result<T, SpyError>;

/// Errors that can occur while setting up or moderating a game.
#[derive(Debug, Error)]
pub enum SpyError {
    /// The role table has no entry for this roster size.
    #[error("unsupported roster size {0}: a game needs 4 to 9 players")]
    UnsupportedRosterSize(usize),

    /// The key source has no pairs for the requested modality.
    #[error("no {0} key pairs available")]
    EmptyKeyPool(KeyModality),

    /// A key pair whose civilian and spy values are the same.
    #[error("key pair has identical civilian and spy values: {0}")]
    IdenticalKeyPair(String),

    /// Two players share a display name.
    #[error("duplicate player name: {0}")]
    DuplicatePlayerName(String),

    /// A player id that is not on the roster.
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    /// Players were registered while a game was already set up.
    #[error("players are already registered; reset before registering again")]
    AlreadyRegistered,

    /// An operation that needs roles and keys ran before `init_game`.
    #[error("game has not been initialized")]
    GameNotInitialized,

    /// A key file or directory could not be read.
    #[error("failed to read keys from {path}: {source}")]
    KeyIo {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A line of a key file was not a valid key pair.
    #[error("invalid key pair at {path}:{line}: {source}")]
    KeyFormat {
        /// Path of the key file.
        path: String,
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}
