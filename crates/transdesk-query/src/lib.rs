//! Query cache for Transdesk.
//!
//! Reads are identified by a [`QueryKey`]. Concurrent reads of one key share
//! a single in-flight request. A successful mutation invalidates every entry
//! under its key prefix so the next read goes back to the backend; cached
//! lists are never patched in place.

pub mod client;
pub mod key;
pub mod locales;
pub mod projects;
pub mod state;

pub use client::QueryClient;
pub use key::QueryKey;
pub use locales::LocaleQueries;
pub use projects::ProjectQueries;
pub use state::{CacheStats, MutationStatus, QueryState};
