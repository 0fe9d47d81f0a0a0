//! Local cache for API responses
//!
//! Stores raw response bodies on disk, keyed by the full request path, with a
//! single TTL applied to every entry. Expired entries are removed lazily when
//! they are looked up; there is no background sweep.

pub mod key;
pub mod locks;
pub mod storage;

pub use storage::ResponseCache;
