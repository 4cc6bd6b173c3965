//! Logging setup for dupefind.
//!
//! Diagnostics go to stderr through the `log` facade and the `env_logger`
//! backend, keeping stdout free for the group list. `RUST_LOG` wins when it
//! is set; otherwise `-q` means errors only, the default is info, `-v` is
//! debug and `-vv` is trace. Flag-derived levels apply to this crate only,
//! dependencies stay at `warn`.
//!
//! | Level   | Events                                                 |
//! |---------|--------------------------------------------------------|
//! | `warn`  | skipped symlinks, unreadable files and directories     |
//! | `info`  | skipped non-regular files, phase summaries             |
//! | `debug` | directories read, repeated paths, hashing totals       |
//! | `trace` | every metric evaluation and escalation                 |
//!
//! ```rust,no_run
//! use dupefind::logging::init_logging;
//!
//! init_logging(1, false);
//! log::debug!("visible with -v");
//! ```

use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Install the stderr logger.
///
/// Only the first call in a process has an effect, so `run_app` can be
/// driven repeatedly from tests.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !filters.is_empty() => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module(env!("CARGO_CRATE_NAME"), level_for(verbose, quiet));
        }
    }

    let detailed = verbose > 0;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        if detailed {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", record.level(), record.args())
        }
    });

    if builder.try_init().is_ok() {
        log::debug!("Logging at {}", log::max_level());
    }
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}
