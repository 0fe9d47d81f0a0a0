//! Shared CLI argument types
//!
//! Reusable argument structs, flattened into the top-level parser.

mod common;
mod filters;
mod global;

pub use common::OutputFormat;
pub use filters::RunFilterArgs;
pub use global::GlobalOptions;
