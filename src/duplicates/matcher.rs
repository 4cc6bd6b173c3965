//! Duplicate matcher: traversal and lazy escalation over the metric ladder.
//!
//! # Overview
//!
//! The matcher walks a forest of directories breadth-first and feeds every
//! regular file into [`DuplicateMatcher::lookup`]. Each file enters the
//! [`MatchTable`] at [`Metric::Size`] and climbs the ladder only while it
//! keeps colliding with files already recorded at its current level:
//!
//! 1. Insert the file at `(metric, measure)`.
//! 2. Alone at that measure: stop.
//! 3. Collision at [`Metric::MAX`]: stop, the files are duplicates.
//! 4. First collision below the top (list length became 2): escalate the
//!    earlier member, which was never evaluated further while it was alone.
//! 5. Any collision below the top: escalate the new file.
//!
//! A file whose size is unique is therefore never opened, and only files
//! whose first kilobyte also collides are read in full.
//!
//! # Example
//!
//! ```no_run
//! use dupefind::duplicates::DuplicateMatcher;
//! use std::path::PathBuf;
//!
//! let mut matcher = DuplicateMatcher::with_defaults();
//! let groups = matcher.scan(&[PathBuf::from(".")]).unwrap();
//!
//! println!("Found {} duplicate groups", groups.len());
//! println!("Reclaimable: {}", matcher.summary().reclaimable_display());
//! ```

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use crate::progress::ProgressCallback;
use crate::scanner::{LadderStats, Metric, MetricLadder, ScanError, PARTIAL_HASH_SIZE};

use super::groups::{total_duplicates, total_wasted_space, DuplicateGroup};
use super::table::MatchTable;

/// Configuration for a [`DuplicateMatcher`].
#[derive(Clone)]
pub struct MatcherConfig {
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
    /// Bytes covered by the partial hash.
    pub partial_size: usize,
}

impl std::fmt::Debug for MatcherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatcherConfig")
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .field("partial_size", &self.partial_size)
            .finish()
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            shutdown_flag: None,
            progress_callback: None,
            partial_size: PARTIAL_HASH_SIZE,
        }
    }
}

impl MatcherConfig {
    /// Set the shutdown flag.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Override the partial-hash window.
    #[must_use]
    pub fn with_partial_size(mut self, bytes: usize) -> Self {
        self.partial_size = bytes;
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a scan or rescan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Regular files entered into the match table
    pub files_examined: usize,
    /// Symbolic links skipped (files and directories)
    pub symlinks_skipped: usize,
    /// Entries that were neither directories nor regular files
    pub non_regular_skipped: usize,
    /// Directories read during traversal
    pub directories_visited: usize,
    /// Per-entry failures; none of these aborted the scan
    pub errors: Vec<ScanError>,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Duplicate files beyond the first of each group
    pub duplicate_files: usize,
    /// Space held by those extra copies
    pub reclaimable_space: u64,
    /// Time spent in `scan`/`rescan`
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Whether any entry had to be skipped because of an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize(self.reclaimable_space).to_string()
    }
}

/// Errors that abort a scan.
///
/// Per-entry problems are not here; they land in [`ScanSummary::errors`].
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by user (Ctrl+C or shutdown signal).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// A search root does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// A search root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A search root is itself a symbolic link.
    #[error("Search directory is a symbolic link: {0}")]
    SymlinkRoot(PathBuf),

    /// A search root could not be inspected.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Owns the match table for one scan and extracts duplicate groups from it.
///
/// A matcher is meant to be built fresh for each invocation. Calling
/// [`scan`](Self::scan) or [`rescan`](Self::rescan) more than once keeps
/// accumulating into the same table.
pub struct DuplicateMatcher {
    config: MatcherConfig,
    ladder: MetricLadder,
    table: MatchTable,
    seen: HashSet<PathBuf>,
    summary: ScanSummary,
}

impl DuplicateMatcher {
    /// Create a matcher with the given configuration.
    #[must_use]
    pub fn new(config: MatcherConfig) -> Self {
        let ladder = MetricLadder::with_partial_size(config.partial_size);
        Self {
            config,
            ladder,
            table: MatchTable::new(),
            seen: HashSet::new(),
            summary: ScanSummary::default(),
        }
    }

    /// Create a matcher with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// Statistics gathered so far.
    #[must_use]
    pub fn summary(&self) -> &ScanSummary {
        &self.summary
    }

    /// Hashing work done so far.
    #[must_use]
    pub fn ladder_stats(&self) -> &LadderStats {
        self.ladder.stats()
    }

    /// The underlying match table.
    #[must_use]
    pub fn table(&self) -> &MatchTable {
        &self.table
    }

    /// Enter one file into the match table and escalate it as far as needed.
    ///
    /// Symlinks and non-regular files are skipped. A path that has already
    /// been examined by this matcher (compared by canonical path) is ignored.
    /// Failures are logged and recorded in the summary, never returned.
    pub fn lookup(&mut self, path: &Path) {
        let metadata = match std::fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(e) => {
                self.record_error(ScanError::from_io(path, e));
                return;
            }
        };

        if metadata.file_type().is_symlink() {
            log::warn!("Skipping symlink: {}", path.display());
            self.summary.symlinks_skipped += 1;
            return;
        }
        if !metadata.is_file() {
            log::info!("Skipping non-regular file: {}", path.display());
            self.summary.non_regular_skipped += 1;
            return;
        }

        let canonical = match path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                self.record_error(ScanError::from_io(path, e));
                return;
            }
        };
        if !self.seen.insert(canonical) {
            log::debug!("Already examined: {}", path.display());
            return;
        }

        self.summary.files_examined += 1;
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_progress(self.summary.files_examined, &path.to_string_lossy());
        }

        self.escalate(path.to_path_buf());
    }

    /// Run the ladder for `path` starting at the cheapest metric.
    ///
    /// The stack is popped LIFO, so pushing the new file before the earlier
    /// member makes the earlier member climb first, exactly as a recursive
    /// descent would.
    fn escalate(&mut self, path: PathBuf) {
        let mut pending = vec![(path, Metric::MIN)];

        while let Some((file, metric)) = pending.pop() {
            let measure = match self.ladder.evaluate(metric, &file) {
                Ok(m) => m,
                Err(e) => {
                    self.record_error(e.into());
                    continue;
                }
            };

            let similar = self.table.insert(metric, measure, file.clone());
            let count = similar.len();
            if count < 2 || metric.is_max() {
                continue;
            }

            let next = metric.next();
            let first = (count == 2).then(|| similar[0].clone());
            log::trace!(
                "{} collision for {} ({} files), escalating to {}",
                metric,
                file.display(),
                count,
                next
            );

            pending.push((file, next));
            if let Some(first) = first {
                pending.push((first, next));
            }
        }
    }

    /// Traverse `roots` breadth-first and return the confirmed duplicate groups.
    ///
    /// Every root is validated before any traversal begins. Directory entries
    /// are visited in file-name order; symlinked directories are not entered.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - A root does not exist, is not a directory, or is a symlink
    /// - The scan is interrupted by shutdown signal
    pub fn scan<P: AsRef<Path>>(&mut self, roots: &[P]) -> Result<Vec<DuplicateGroup>, FinderError> {
        let start_time = Instant::now();

        for root in roots {
            validate_root(root.as_ref())?;
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("scan", 0);
        }

        let mut work: VecDeque<PathBuf> = roots.iter().map(|r| r.as_ref().to_path_buf()).collect();
        let result = self.traverse(&mut work);

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("scan");
        }
        self.summary.scan_duration += start_time.elapsed();
        result?;

        Ok(self.finish())
    }

    fn traverse(&mut self, work: &mut VecDeque<PathBuf>) -> Result<(), FinderError> {
        while let Some(dir) = work.pop_front() {
            log::debug!("Reading directory: {}", dir.display());
            let mut entries: Vec<std::fs::DirEntry> = match std::fs::read_dir(&dir) {
                Ok(iter) => iter
                    .filter_map(|entry| match entry {
                        Ok(e) => Some(e),
                        Err(e) => {
                            self.record_error(ScanError::from_read_dir(&dir, e));
                            None
                        }
                    })
                    .collect(),
                Err(e) => {
                    self.record_error(ScanError::from_read_dir(&dir, e));
                    continue;
                }
            };
            self.summary.directories_visited += 1;
            entries.sort_by_key(std::fs::DirEntry::file_name);

            for entry in entries {
                if self.config.is_shutdown_requested() {
                    log::info!("Scan interrupted");
                    return Err(FinderError::Interrupted);
                }

                let path = entry.path();
                match entry.file_type() {
                    Ok(ft) if ft.is_dir() => work.push_back(path),
                    Ok(_) => self.lookup(&path),
                    Err(e) => self.record_error(ScanError::from_io(&path, e)),
                }
            }
        }
        Ok(())
    }

    /// Re-validate previously reported groups by looking up each listed path.
    ///
    /// No directory is traversed. Paths that have vanished are recorded as
    /// errors and simply drop out of the result.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Interrupted`] if a shutdown is requested.
    pub fn rescan(&mut self, groups: &[DuplicateGroup]) -> Result<Vec<DuplicateGroup>, FinderError> {
        let start_time = Instant::now();
        let total: usize = groups.iter().map(DuplicateGroup::len).sum();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("rescan", total);
        }

        let mut result = Ok(());
        for path in groups.iter().flat_map(|g| g.files.iter()) {
            if self.config.is_shutdown_requested() {
                log::info!("Rescan interrupted");
                result = Err(FinderError::Interrupted);
                break;
            }
            self.lookup(path);
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("rescan");
        }
        self.summary.scan_duration += start_time.elapsed();
        result?;

        Ok(self.finish())
    }

    /// Confirmed duplicate groups currently in the table.
    ///
    /// Only full-hash measures shared by at least two files are returned.
    /// Paths are canonicalized (the discovered path is kept if that fails),
    /// and groups are sorted by their first member.
    #[must_use]
    pub fn groups(&self) -> Vec<DuplicateGroup> {
        let mut groups: Vec<DuplicateGroup> = self
            .table
            .level(Metric::MAX)
            .filter(|(_, files)| files.len() >= 2)
            .map(|(_, files)| {
                DuplicateGroup::new(
                    files
                        .iter()
                        .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
                        .collect(),
                )
            })
            .collect();
        groups.sort_by(|a, b| a.files.first().cmp(&b.files.first()));
        groups
    }

    fn finish(&mut self) -> Vec<DuplicateGroup> {
        let groups = self.groups();
        self.summary.duplicate_groups = groups.len();
        self.summary.duplicate_files = total_duplicates(&groups);
        self.summary.reclaimable_space = total_wasted_space(&groups);

        let stats = self.ladder.stats();
        log::debug!(
            "Evaluations: size={}, partial={}, full={}; {} full hashes computed, {} cache hits, {} read",
            stats.evaluations_at(Metric::Size),
            stats.evaluations_at(Metric::PartialHash),
            stats.evaluations_at(Metric::FullHash),
            stats.full_hashes_computed,
            stats.cache_hits,
            ByteSize(stats.bytes_hashed)
        );
        groups
    }

    fn record_error(&mut self, error: ScanError) {
        log::warn!("{}", error);
        self.summary.errors.push(error);
    }
}

fn validate_root(root: &Path) -> Result<(), FinderError> {
    let metadata = std::fs::symlink_metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FinderError::PathNotFound(root.to_path_buf())
        } else {
            FinderError::Io {
                path: root.to_path_buf(),
                source: e,
            }
        }
    })?;

    if metadata.file_type().is_symlink() {
        return Err(FinderError::SymlinkRoot(root.to_path_buf()));
    }
    if !metadata.is_dir() {
        return Err(FinderError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}
