//! Narrow duplicate groups to members whose path matches a pattern.
//!
//! The result is meant to be a list of deletion candidates, so a group in
//! which every member matches always gives up its last member: at least one
//! copy of each file survives.

use regex::Regex;

use super::groups::{path_string, DuplicateGroup};

/// Keep the members of each group whose path contains a match for `pattern`.
///
/// Groups with fewer than two members are ignored. Groups left with no
/// matching members are dropped.
#[must_use]
pub fn filter_groups(groups: &[DuplicateGroup], pattern: &Regex) -> Vec<DuplicateGroup> {
    groups
        .iter()
        .filter(|group| group.len() >= 2)
        .filter_map(|group| {
            let mut kept: Vec<_> = group
                .files
                .iter()
                .filter(|p| pattern.is_match(&path_string(p)))
                .cloned()
                .collect();

            if kept.len() == group.len() {
                kept.pop();
            }
            if kept.is_empty() {
                None
            } else {
                Some(DuplicateGroup::new(kept))
            }
        })
        .collect()
}
