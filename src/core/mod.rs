//! Core utilities for the sports dashboard data layer
//!
//! This module consolidates the plumbing shared by every feed:
//! - `query`: ordered query-string parameters
//! - `http`: the GET-only remote resource client
//! - `cache`: bounded in-memory cache for immutable results

pub mod cache;
pub mod http;
pub mod query;

// Re-export commonly used items for convenience
pub use cache::{CacheKey, MemoryCache};
pub use http::ResourceClient;
pub use query::{ParamValue, QueryParameters};
