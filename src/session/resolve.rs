//! Resolving loaded relative paths against the working directory.

use std::path::Path;

use crate::duplicates::DuplicateGroup;

/// Join every relative path onto `cwd`.
///
/// This is purely lexical: nothing is canonicalized and symlinks are left
/// as written. Absolute paths are kept unchanged and empty groups are dropped.
#[must_use]
pub fn resolve_to_cwd(groups: Vec<DuplicateGroup>, cwd: &Path) -> Vec<DuplicateGroup> {
    groups
        .into_iter()
        .filter(|g| !g.is_empty())
        .map(|g| {
            DuplicateGroup::new(
                g.files
                    .into_iter()
                    .map(|p| if p.is_absolute() { p } else { cwd.join(p) })
                    .collect(),
            )
        })
        .collect()
}
