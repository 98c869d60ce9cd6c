//! Refresh primitives shared by every dashboard feed
//!
//! - `subscription`: fixed-interval polling with stale-response guards
//! - `paginator`: offset/limit accumulation with filter epochs

pub mod paginator;
pub mod subscription;

pub use paginator::{PageRequest, PageState, Paginator};
pub use subscription::{KeyedSubscription, PollingState, Subscription};
