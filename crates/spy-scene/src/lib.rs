//! Round orchestration for "Who is the Spy".
//!
//! A [`Scene`] seats a set of [`Agent`]s and plays games against the
//! [`spy_core::Moderator`]: keys are delivered, then each round players
//! describe, predict, and vote until one side wins. Every message goes to a
//! [`MessagePool`] for visibility and to a [`LogSink`] for audit.

pub mod agent;
pub mod agents;
pub mod config;
pub mod error;
pub mod log;
pub mod order;
pub mod pool;
pub mod report;
pub mod scene;

pub use agent::{ActionKind, Agent, Turn};
pub use agents::{RandomAgent, Scripted, ScriptedAgent};
pub use config::{ActionTimeouts, DescribeOrder, SceneConfig, SpeakOrder};
pub use error::{AgentError, AgentResult, SceneError, SceneResult};
pub use log::{LogEntry, LogSink, Transcript};
pub use pool::MessagePool;
pub use report::GameReport;
pub use scene::Scene;
