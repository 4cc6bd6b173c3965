//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The match table (metric → measure → files)
//! - Directory traversal with lazy escalation up the metric ladder
//! - Duplicate group management and regex filtering

pub mod filter;
pub mod groups;
pub mod matcher;
pub mod table;

pub use filter::filter_groups;
pub use groups::{path_string, total_duplicates, total_wasted_space, DuplicateGroup};
pub use matcher::{DuplicateMatcher, FinderError, MatcherConfig, ScanSummary};
pub use table::MatchTable;
