//! Cache key definitions.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

/// Stable identity of a file for the lifetime of one invocation.
///
/// On Unix this is the `(device, inode)` pair, so two paths naming the same
/// inode share one cache slot. Elsewhere the canonical path is used, which is
/// adequate as long as the scan does not span remounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKey {
    /// Device id and inode number.
    Inode {
        /// Device the file lives on
        dev: u64,
        /// Inode number on that device
        ino: u64,
    },
    /// Fully resolved path.
    Canonical(PathBuf),
}

impl FileKey {
    /// Build the key for `path` from metadata already in hand.
    ///
    /// # Errors
    ///
    /// Only fails on platforms without inode numbers, when the path cannot
    /// be canonicalized.
    #[cfg(unix)]
    pub fn from_metadata(_path: &Path, metadata: &Metadata) -> io::Result<Self> {
        use std::os::unix::fs::MetadataExt;
        Ok(Self::Inode {
            dev: metadata.dev(),
            ino: metadata.ino(),
        })
    }

    /// Build the key for `path` from metadata already in hand.
    ///
    /// # Errors
    ///
    /// Fails when the path cannot be canonicalized.
    #[cfg(not(unix))]
    pub fn from_metadata(path: &Path, _metadata: &Metadata) -> io::Result<Self> {
        path.canonicalize().map(Self::Canonical)
    }

    /// Stat `path` (without following symlinks) and build its key.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be stat'd.
    pub fn for_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::symlink_metadata(path)?;
        Self::from_metadata(path, &metadata)
    }
}
