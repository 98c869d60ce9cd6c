//! Sports Dashboard Data Layer
//!
//! Client-side plumbing for a live sports dashboard: typed GET access to
//! public JSON sports APIs, fixed-interval polling with stale-response
//! guards, offset/limit pagination, head-to-head stat comparison and the
//! date arithmetic the upstream endpoints expect.
//!
//! ## Features
//!
//! - **Remote resources**: One GET-only client per upstream, with ordered query parameters
//! - **Polling**: Subscriptions that refresh on an interval and keep the last good data on error
//! - **Pagination**: Accumulates pages and discards responses for superseded filters
//! - **Comparison**: Per-category leaders honoring "lower is better" stats
//! - **Dates**: Canonical days with compact, slash and week-anchored forms
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sports_dash::{feeds::ScoreboardSource, Config, DateSpec, League};
//!
//! # async fn example() -> sports_dash::Result<()> {
//! let config = Config::from_env()?;
//! let source = ScoreboardSource::new(config.espn_client()?, 16);
//!
//! let today = DateSpec::today();
//! let games = source.fetch(League::Nfl, today, today).await?;
//! println!("{} games this week", games.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export SPORTS_DASH_POLL_SECS=15
//! export SPORTS_DASH_PAGE_SIZE=50
//! export RUST_LOG=sports_dash=debug
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dates;
pub mod error;
pub mod feeds;
pub mod leagues;
pub mod poll;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use core::{ParamValue, QueryParameters, ResourceClient};
pub use dates::{DateRange, DateSpec};
pub use error::{DashError, ErrorInfo, ErrorKind, Result};
pub use leagues::League;
pub use poll::{KeyedSubscription, PageState, Paginator, PollingState, Subscription};
pub use stats::{compare_stats, CategoryDescriptor, Direction, Leader, StatComparison};
