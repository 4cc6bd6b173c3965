//! The metric ladder: size, partial hash, full hash.
//!
//! # Overview
//!
//! Files are compared with the cheapest metric first. A more expensive
//! metric is only evaluated for a file once it has collided with another
//! file at the level below, so a file with a unique size is never opened.
//!
//! | Metric        | Measure             | Cost                       |
//! |---------------|---------------------|----------------------------|
//! | `Size`        | byte count          | one `lstat`                |
//! | `PartialHash` | digest of 1 KiB     | one short read             |
//! | `FullHash`    | digest of all bytes | full read, cached per file |
//!
//! # Example
//!
//! ```
//! use dupefind::scanner::Metric;
//!
//! assert_eq!(Metric::Size.next(), Metric::PartialHash);
//! assert_eq!(Metric::MAX.next(), Metric::MAX);
//! assert_eq!(Metric::MIN.previous(), Metric::MIN);
//! ```

use std::fmt;
use std::path::Path;

use crate::cache::{FileKey, HashCache};

use super::hasher::{hash_to_hex, Digest, Hasher, PARTIAL_HASH_SIZE};
use super::HashError;

/// A comparison criterion, ordered from cheapest to most precise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// On-disk size in bytes
    Size,
    /// Digest of the first [`PARTIAL_HASH_SIZE`] bytes
    PartialHash,
    /// Digest of the entire content
    FullHash,
}

impl Metric {
    /// Cheapest metric; every file enters the ladder here.
    pub const MIN: Metric = Metric::Size;
    /// Most precise metric; equality here confirms a duplicate.
    pub const MAX: Metric = Metric::FullHash;
    /// The whole ladder in order.
    pub const ALL: [Metric; 3] = [Metric::Size, Metric::PartialHash, Metric::FullHash];

    /// The next more expensive metric. `next(MAX) == MAX`.
    #[must_use]
    pub fn next(self) -> Metric {
        match self {
            Metric::Size => Metric::PartialHash,
            Metric::PartialHash | Metric::FullHash => Metric::FullHash,
        }
    }

    /// The next cheaper metric. `previous(MIN) == MIN`.
    #[must_use]
    pub fn previous(self) -> Metric {
        match self {
            Metric::Size | Metric::PartialHash => Metric::Size,
            Metric::FullHash => Metric::PartialHash,
        }
    }

    /// Whether this is the top of the ladder.
    #[must_use]
    pub fn is_max(self) -> bool {
        self == Metric::MAX
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Size => write!(f, "size"),
            Metric::PartialHash => write!(f, "partial-hash"),
            Metric::FullHash => write!(f, "full-hash"),
        }
    }
}

/// The value of one metric for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    /// Byte count
    Size(u64),
    /// 128-bit content digest
    Digest(Digest),
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Size(bytes) => write!(f, "{bytes}"),
            Measure::Digest(digest) => write!(f, "{}", hash_to_hex(digest)),
        }
    }
}

/// Counters describing how much work the ladder has done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadderStats {
    /// Successful evaluations, indexed by metric
    pub evaluations: [usize; 3],
    /// Full-content digests actually computed (cache misses)
    pub full_hashes_computed: usize,
    /// Full-content digests served from the cache
    pub cache_hits: usize,
    /// Total bytes read for hashing
    pub bytes_hashed: u64,
}

impl LadderStats {
    /// Number of successful evaluations at `metric`.
    #[must_use]
    pub fn evaluations_at(&self, metric: Metric) -> usize {
        self.evaluations[metric.index()]
    }
}

/// Evaluates metrics for files and owns the full-hash cache.
#[derive(Debug)]
pub struct MetricLadder {
    hasher: Hasher,
    cache: HashCache,
    partial_size: usize,
    stats: LadderStats,
}

impl Default for MetricLadder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricLadder {
    /// Create a ladder with the standard partial-hash window.
    #[must_use]
    pub fn new() -> Self {
        Self::with_partial_size(PARTIAL_HASH_SIZE)
    }

    /// Create a ladder with a custom partial-hash window.
    #[must_use]
    pub fn with_partial_size(partial_size: usize) -> Self {
        Self {
            hasher: Hasher::new(),
            cache: HashCache::new(),
            partial_size: partial_size.max(1),
            stats: LadderStats::default(),
        }
    }

    /// Work counters accumulated so far.
    #[must_use]
    pub fn stats(&self) -> &LadderStats {
        &self.stats
    }

    /// The full-hash cache.
    #[must_use]
    pub fn cache(&self) -> &HashCache {
        &self.cache
    }

    /// Compute the measure of `metric` for the file at `path`.
    ///
    /// `Size` is read from `lstat` and never follows symlinks. `PartialHash`
    /// of a file no larger than the window is its full digest, which is then
    /// cached so a later `FullHash` evaluation does not read the file again.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be stat'd, opened, or read.
    /// Whether that is fatal is up to the caller.
    pub fn evaluate(&mut self, metric: Metric, path: &Path) -> Result<Measure, HashError> {
        let measure = match metric {
            Metric::Size => {
                let metadata =
                    std::fs::symlink_metadata(path).map_err(|e| HashError::from_io(path, e))?;
                Measure::Size(metadata.len())
            }
            Metric::PartialHash => {
                let metadata =
                    std::fs::symlink_metadata(path).map_err(|e| HashError::from_io(path, e))?;
                if metadata.len() <= self.partial_size as u64 {
                    let key = FileKey::from_metadata(path, &metadata)
                        .map_err(|e| HashError::from_io(path, e))?;
                    Measure::Digest(self.cached_full_hash(key, path)?)
                } else {
                    let (digest, bytes) = self.hasher.partial_hash(path, self.partial_size)?;
                    self.stats.bytes_hashed += bytes;
                    Measure::Digest(digest)
                }
            }
            Metric::FullHash => {
                let key = FileKey::for_path(path).map_err(|e| HashError::from_io(path, e))?;
                Measure::Digest(self.cached_full_hash(key, path)?)
            }
        };

        self.stats.evaluations[metric.index()] += 1;
        log::trace!("{} of {} = {}", metric, path.display(), measure);
        Ok(measure)
    }

    fn cached_full_hash(&mut self, key: FileKey, path: &Path) -> Result<Digest, HashError> {
        if let Some(digest) = self.cache.get(&key) {
            self.stats.cache_hits += 1;
            log::trace!("Full hash cache hit: {}", path.display());
            return Ok(digest);
        }

        let (digest, bytes) = self.hasher.full_hash_counted(path)?;
        self.stats.full_hashes_computed += 1;
        self.stats.bytes_hashed += bytes;
        self.cache.insert(key, digest);
        Ok(digest)
    }
}
