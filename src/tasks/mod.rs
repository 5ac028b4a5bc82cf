//! Background Tasks Module
//!
//! Contains tasks that run periodically alongside cache consumers.
//!
//! # Tasks
//! - Stats Report: Logs a cache statistics snapshot at configured intervals

mod report;

pub use report::spawn_stats_reporter;
