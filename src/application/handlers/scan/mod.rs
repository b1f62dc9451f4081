//! Scan workflow handling.

mod scan_workflow;

pub use scan_workflow::{ScanTiming, ScanWorkflowController};
