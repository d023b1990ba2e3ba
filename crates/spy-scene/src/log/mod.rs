//! The append-only audit log.

pub mod entry;
pub mod transcript;

pub use entry::LogEntry;
pub use transcript::Transcript;

/// Where finished log entries go. Entries are never modified after append.
pub trait LogSink: Send {
    /// Record one entry.
    fn append(&mut self, entry: LogEntry);
}
