//! Built-in agents.

pub mod random;
pub mod scripted;

pub use random::RandomAgent;
pub use scripted::{Observed, Scripted, ScriptedAgent};
