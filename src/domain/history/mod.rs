//! History domain module.
//!
//! Completed scans are stored newest-first as immutable [`HistoryEntry`]
//! snapshots.

mod entry;

pub use entry::HistoryEntry;
