//! Duplicate group value type.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] is the output unit of a scan: two or more paths whose
//! full-content digests are equal. Groups loaded back from a saved list use
//! the same type, so filtering and output do not care where a group came
//! from.
//!
//! # Example
//!
//! ```
//! use dupefind::duplicates::DuplicateGroup;
//!
//! let group = DuplicateGroup::from_strings(vec!["/a.txt".into(), "/b.txt".into()]);
//! assert_eq!(group.len(), 2);
//! assert_eq!(group.duplicate_count(), 1);
//! ```

use std::path::{Path, PathBuf};

/// A set of files with identical content.
///
/// Member order reflects discovery order and carries no meaning beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DuplicateGroup {
    /// Paths of the files in this group
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create a group from paths.
    #[must_use]
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Create a group from path strings, as read from a saved list.
    #[must_use]
    pub fn from_strings(files: Vec<String>) -> Self {
        Self {
            files: files.into_iter().map(PathBuf::from).collect(),
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Paths rendered as strings for output and pattern matching.
    #[must_use]
    pub fn path_strings(&self) -> Vec<String> {
        self.files.iter().map(|p| path_string(p)).collect()
    }

    /// Space held by the redundant copies, from current file metadata.
    ///
    /// Files that can no longer be stat'd count as zero.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        let size = self
            .files
            .first()
            .and_then(|p| std::fs::symlink_metadata(p).ok())
            .map_or(0, |m| m.len());
        size * self.duplicate_count() as u64
    }
}

/// Render a path the way every output format shows it.
#[must_use]
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Total redundant copies across groups.
#[must_use]
pub fn total_duplicates(groups: &[DuplicateGroup]) -> usize {
    groups.iter().map(DuplicateGroup::duplicate_count).sum()
}

/// Total reclaimable space across groups.
#[must_use]
pub fn total_wasted_space(groups: &[DuplicateGroup]) -> u64 {
    groups.iter().map(DuplicateGroup::wasted_space).sum()
}
