//! History handlers.

mod clear_history;
mod list_history;

pub use clear_history::ClearHistoryHandler;
pub use list_history::{GetScanHandler, GetScanQuery, ListHistoryHandler};
