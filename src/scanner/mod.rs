//! Scanner module: file metrics and content hashing.
//!
//! This module provides functionality for:
//! - The metric ladder (size, partial hash, full hash)
//! - Content hashing with BLAKE3
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`metric`]: Metric ordering and per-file measure evaluation
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupefind::scanner::{Metric, MetricLadder};
//! use std::path::Path;
//!
//! let mut ladder = MetricLadder::new();
//! let size = ladder.evaluate(Metric::Size, Path::new("Cargo.toml")).unwrap();
//! println!("{size}");
//! ```

pub mod hasher;
pub mod metric;

use std::io;
use std::path::{Path, PathBuf};

// Re-export main types
pub use hasher::{hash_to_hex, Digest, Hasher, DIGEST_LEN, PARTIAL_HASH_SIZE};
pub use metric::{LadderStats, Measure, Metric, MetricLadder};

/// A per-entry failure during traversal or rescan.
///
/// None of these abort a scan; they are collected into the scan summary.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Access to a file or directory was refused.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The entry disappeared between being listed and being examined.
    #[error("Vanished during scan: {0}")]
    NotFound(PathBuf),

    /// A directory was listed but its entries could not be read.
    #[error("Cannot read directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other failure to stat or resolve an entry.
    #[error("Cannot inspect {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A metric could not be evaluated for a file.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl ScanError {
    /// Classify a failure to stat or resolve `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Classify a failure to list the directory `path`.
    #[must_use]
    pub fn from_read_dir(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::Other | io::ErrorKind::InvalidData => Self::Directory {
                path: path.to_path_buf(),
                source,
            },
            _ => Self::from_io(path, source),
        }
    }

    /// The path the failure is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PermissionDenied(path) | Self::NotFound(path) => path,
            Self::Directory { path, .. } | Self::Io { path, .. } => path,
            Self::Hash(err) => err.path(),
        }
    }
}

/// A failure to stat, open, or read a file while evaluating a metric.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Read failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// The file that could not be read.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
