//! Command-line interface definitions for dupefind.
//!
//! This module defines all CLI arguments using the clap derive API. There
//! are two mutually exclusive modes: scanning directories (`-d`) and loading
//! a saved group list (`-i`), optionally rescanning it (`-r`).
//!
//! # Example
//!
//! ```bash
//! # Scan two directories, plain output to stdout
//! dupefind -d ~/Pictures -d /mnt/backup/Pictures
//!
//! # Save as JSON, then later validate the saved list
//! dupefind -d ~/Downloads -o dupes.json --out-type json
//! dupefind -i dupes.json -r
//!
//! # Candidates for deletion: copies under the backup tree
//! dupefind -i dupes.json -f '^/mnt/backup/'
//! ```

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::session::InputFormat;

/// Find files with identical content.
///
/// Files are compared by size first, then by a hash of their first
/// kilobyte, and only then by a hash of their whole content.
#[derive(Debug, Parser)]
#[command(name = "dupefind")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["search_dirs", "in_file"]),
))]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output errors as JSON to stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory to search (repeatable)
    #[arg(short = 'd', long = "search-dir", value_name = "DIR")]
    pub search_dirs: Vec<PathBuf>,

    /// Previously saved group list to load
    #[arg(short = 'i', long, value_name = "FILE")]
    pub in_file: Option<PathBuf>,

    /// Format of the input file [default: json]
    #[arg(long, value_enum, requires = "in_file", conflicts_with = "search_dirs")]
    pub in_type: Option<InputFormat>,

    /// Re-validate the loaded groups against the filesystem
    #[arg(short, long, requires = "in_file", conflicts_with = "search_dirs")]
    pub rescan: bool,

    /// Write output to this file (must not exist)
    #[arg(short, long, value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Output format [default: plain]
    #[arg(long, value_enum)]
    pub out_type: Option<OutputFormat>,

    /// Keep only group members whose path matches this regex
    #[arg(short, long = "filter", value_name = "REGEX")]
    pub filter_pattern: Option<String>,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,
}
