//! Output formatters for duplicate groups.
//!
//! This module provides different output formats for scan results:
//! - Plain quoted paths for shell pipelines
//! - CSV for spreadsheet import
//! - JSON for automation and scripting
//!
//! CSV and JSON output can be read back with [`crate::session::load_groups`].
//!
//! # Example
//!
//! ```no_run
//! use dupefind::duplicates::DuplicateMatcher;
//! use dupefind::output::{write_groups, OutputFormat};
//! use std::path::PathBuf;
//!
//! let mut matcher = DuplicateMatcher::with_defaults();
//! let groups = matcher.scan(&[PathBuf::from(".")]).unwrap();
//!
//! write_groups(&groups, OutputFormat::Json, std::io::stdout()).unwrap();
//! ```

pub mod csv;
pub mod json;
pub mod plain;

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duplicates::DuplicateGroup;

// Re-export main types
pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::plain::PlainOutput;

/// Output format for duplicate groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Space-joined quoted paths, one group per line
    #[default]
    Plain,
    /// CSV for spreadsheets
    Csv,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Errors that can occur while writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output file already exists and will not be overwritten.
    #[error("Output file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Refuse an output path that already exists.
///
/// # Errors
///
/// Returns [`OutputError::AlreadyExists`] if anything is at `path`,
/// including a dangling symlink.
pub fn ensure_absent(path: &Path) -> Result<(), OutputError> {
    if std::fs::symlink_metadata(path).is_ok() {
        return Err(OutputError::AlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

/// Create a new output file, failing if it already exists.
///
/// # Errors
///
/// Returns [`OutputError::AlreadyExists`] if the file exists, or an I/O
/// error if it cannot be created.
pub fn open_output(path: &Path) -> Result<BufWriter<File>, OutputError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                OutputError::AlreadyExists(path.to_path_buf())
            } else {
                OutputError::Io(e)
            }
        })?;
    Ok(BufWriter::new(file))
}

/// Render `groups` in `format` to `writer`.
///
/// # Errors
///
/// Returns `OutputError` if serialization or writing fails.
pub fn write_groups<W: Write>(
    groups: &[DuplicateGroup],
    format: OutputFormat,
    writer: W,
) -> Result<(), OutputError> {
    match format {
        OutputFormat::Plain => PlainOutput::new(groups).write_to(writer),
        OutputFormat::Csv => CsvOutput::new(groups).write_to(writer),
        OutputFormat::Json => JsonOutput::new(groups).write_to(writer),
    }
}
