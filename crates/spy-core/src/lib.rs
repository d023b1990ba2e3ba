//! Game rules for "Who is the Spy".
//!
//! Players receive a secret key: Civilians share the correct one, Spies get a
//! similar but different one, and an optional Blank gets none. Each round the
//! players describe their key, guess who holds which role, and vote someone
//! out. This crate holds the roster, role table, key sources, locale data,
//! response parsers, and the [`Moderator`] that owns all per-game state.
//! It has no async runtime; driving agents is left to the caller.

pub mod config;
pub mod error;
pub mod key;
pub mod locale;
pub mod message;
pub mod moderator;
pub mod names;
pub mod parse;
pub mod role;
pub mod roster;

pub use config::GameConfig;
pub use error::{SpyError, SpyResult};
pub use key::{Key, KeyModality, KeyPair, KeySource};
pub use locale::Locale;
pub use message::{MODERATOR_NAME, Message, MessageBody, MessageId, Participant};
pub use moderator::{
    GameOverSummary, InitSummary, Moderator, PredictionSummary, VoteOutcome, VoteSummary,
};
pub use parse::{PredictionParser, ResponseParser, RolePrediction, VoteParser};
pub use role::{MAX_PLAYERS, MIN_PLAYERS, Role, RoleCounts, role_counts};
pub use roster::{PlayerId, PlayerStatus, Profile, Roster};
