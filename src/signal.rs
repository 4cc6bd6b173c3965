//! Ctrl+C handling.
//!
//! A single `AtomicBool` is shared between the signal hook and the matcher.
//! The matcher polls it between directory entries, so the first Ctrl+C stops
//! the scan at an entry boundary and the process exits with code 130. A
//! second Ctrl+C while that is happening exits at once.
//!
//! ```rust,no_run
//! use dupefind::duplicates::MatcherConfig;
//! use dupefind::signal::install_handler;
//!
//! let handler = install_handler();
//! let config = MatcherConfig::default().with_shutdown_flag(handler.get_flag());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::ExitCode;

/// Shared interrupt flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with the flag lowered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or [`request_shutdown`](Self::request_shutdown) was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Raise the flag, as Ctrl+C would. Returns whether it was already raised.
    pub fn request_shutdown(&self) -> bool {
        self.flag.swap(true, Ordering::SeqCst)
    }

    /// The flag itself, for [`MatcherConfig::with_shutdown_flag`](crate::duplicates::MatcherConfig::with_shutdown_flag).
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Lower the flag again, e.g. before the next `run_app` in the same process.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

static INSTALLED: OnceLock<ShutdownHandler> = OnceLock::new();

/// Hook Ctrl+C once per process and return the handler it raises.
///
/// Later calls return the same handler with its flag lowered. If another
/// hook already owns the signal, the returned handler is simply never
/// raised by Ctrl+C.
pub fn install_handler() -> ShutdownHandler {
    let handler = INSTALLED.get_or_init(|| {
        let handler = ShutdownHandler::new();
        let hooked = handler.clone();

        if let Err(e) = ctrlc::set_handler(move || {
            if hooked.request_shutdown() {
                eprintln!("\nInterrupted again, exiting.");
                std::process::exit(ExitCode::Interrupted.as_i32());
            }
            eprintln!("\nInterrupted. Finishing the current entry...");
        }) {
            log::debug!("Ctrl+C handler not installed: {}", e);
        }
        handler
    });

    handler.reset();
    handler.clone()
}
