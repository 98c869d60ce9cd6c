//! Stat evaluation helpers.

pub mod compare;

pub use compare::{
    compare, compare_stats, parse_stat, tally, CategoryDescriptor, Direction, Leader,
    StatComparison, StatLine, Tally,
};
