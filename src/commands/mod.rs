//! Command implementations for the sports dashboard CLI

pub mod common;
pub mod compare;
pub mod dates;
pub mod leaders;
pub mod scores;
