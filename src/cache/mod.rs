//! In-memory hash cache for one invocation.
//!
//! The cache memoizes full-content digests so a file is never read end to
//! end more than once per process, even when it is evaluated again during a
//! rescan or after its partial hash already covered the whole file.
//!
//! # Architecture
//!
//! * [`entry`]: The [`FileKey`] identity a digest is stored under.
//!
//! Nothing here is persisted; the cache is dropped with its owning
//! [`MetricLadder`](crate::scanner::MetricLadder).

pub mod entry;

use std::collections::HashMap;

pub use entry::FileKey;

use crate::scanner::Digest;

/// Memoized full-content digests keyed by file identity.
#[derive(Debug, Default)]
pub struct HashCache {
    entries: HashMap<FileKey, Digest>,
}

impl HashCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously computed full digest.
    #[must_use]
    pub fn get(&self, key: &FileKey) -> Option<Digest> {
        self.entries.get(key).copied()
    }

    /// Record the full digest for a file.
    pub fn insert(&mut self, key: FileKey, digest: Digest) {
        self.entries.insert(key, digest);
    }

    /// Number of cached digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
