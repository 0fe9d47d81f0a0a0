//! GitHub Actions API client
//!
//! Two layers: [`GitHubClient`] is the raw REST transport, and
//! [`ActionsClient`] turns it into cached, paginated, typed listings.

pub mod actions;
pub mod api;
pub mod github;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use actions::ActionsClient;
pub use api::{ActionsApi, RestApi};
pub use github::GitHubClient;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::{MockActionsApi, MockRestClient};
pub use pagination::RunFilter;
