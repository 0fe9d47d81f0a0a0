//! API trait definitions split by layer
//!
//! - [`RestApi`] - raw transport: one GET, one response body
//! - [`ActionsApi`] - typed, fully paginated Actions listings

mod actions;
mod rest;

pub use actions::ActionsApi;
pub use rest::RestApi;
