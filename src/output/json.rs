//! JSON output formatting
//!
//! Rows are emitted as a bare pretty-printed array so scripts can consume
//! the summary contract directly.

use serde::Serialize;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}
