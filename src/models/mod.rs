//! Display models for CLI output
//!
//! Shapes the client and metrics types into table rows and the JSON rows of
//! the listing commands.

pub mod display;
pub mod listing;

pub use display::{JobDisplay, RunDisplay, SummaryDisplay, WorkflowDisplay};
pub use listing::RunRow;
