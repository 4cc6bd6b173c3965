//! dupefind - find files with identical content.
//!
//! Files are compared by size, then by a hash of their first kilobyte, then
//! by a hash of their whole content, and each step is only taken for files
//! that are still tied with another file after the previous one. Results can
//! be written as plain text, CSV, or JSON, read back later, narrowed with a
//! regular expression, and re-validated against the filesystem.

pub mod cache;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod session;
pub mod signal;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use regex::Regex;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{filter_groups, DuplicateGroup, DuplicateMatcher, MatcherConfig};
use crate::error::ExitCode;
use crate::progress::Progress;

/// Run one invocation of the tool.
///
/// Everything that can be rejected up front (configuration, an existing
/// output file, an invalid pattern, an unreadable input list, an invalid
/// search root) is rejected before any output is written.
///
/// # Errors
///
/// Returns an error for any fatal condition; per-file problems during a
/// scan are logged and reflected in the exit code instead.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())?;
    let out_type = cli.out_type.unwrap_or(config.out_type);

    if let Some(ref out_file) = cli.out_file {
        output::ensure_absent(out_file)?;
    }

    let pattern = cli
        .filter_pattern
        .as_deref()
        .map(Regex::new)
        .transpose()
        .context("Invalid filter pattern")?;

    let show_progress = config.progress && !cli.quiet && !cli.no_progress;
    let handler = signal::install_handler();
    let matcher_config = MatcherConfig::default()
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(Arc::new(Progress::new(!show_progress)));
    let mut matcher = DuplicateMatcher::new(matcher_config);

    let mut groups: Vec<DuplicateGroup> = if let Some(ref in_file) = cli.in_file {
        let in_type = cli.in_type.unwrap_or(config.in_type);
        let loaded = session::load_groups(in_file, in_type)?;
        log::info!("Loaded {} groups from {}", loaded.len(), in_file.display());

        if cli.rescan {
            matcher.rescan(&loaded).context("Rescan failed")?
        } else {
            loaded
        }
    } else {
        matcher.scan(&cli.search_dirs).context("Scan failed")?
    };

    if let Some(ref pattern) = pattern {
        let before = groups.len();
        groups = filter_groups(&groups, pattern);
        log::info!(
            "Filter '{}' kept {} of {} groups",
            pattern.as_str(),
            groups.len(),
            before
        );
    }

    // Saved relative paths are matched as written and only resolved for display.
    if cli.in_file.is_some() && !cli.rescan {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        groups = session::resolve_to_cwd(groups, &cwd);
    }

    match cli.out_file {
        Some(ref out_file) => {
            let writer = output::open_output(out_file)?;
            output::write_groups(&groups, out_type, writer)
                .with_context(|| format!("Failed to write {}", out_file.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            output::write_groups(&groups, out_type, &mut lock)
                .context("Failed to write output")?;
            lock.flush()?;
        }
    }

    let summary = matcher.summary();
    if cli.in_file.is_none() || cli.rescan {
        log::info!(
            "Examined {} files: {} duplicate groups, {} redundant copies, {} reclaimable ({:.2?})",
            summary.files_examined,
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.scan_duration
        );
    } else {
        log::info!(
            "{} groups, {} reclaimable",
            groups.len(),
            ByteSize(duplicates::total_wasted_space(&groups))
        );
    }
    if summary.has_errors() {
        log::warn!("{} entries skipped because of errors", summary.errors.len());
        for err in &summary.errors {
            log::debug!("  skipped {}", err.path().display());
        }
    }

    Ok(if groups.is_empty() {
        ExitCode::NoDuplicates
    } else if summary.has_errors() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    })
}
