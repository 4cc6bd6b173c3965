//! Session module for previously saved duplicate-group lists.
//!
//! A list written by one run (CSV or JSON output) can be read back by a
//! later run to be filtered, re-formatted, or rescanned.
//!
//! # Architecture
//!
//! * [`io`]: Reading group lists in either format.
//! * [`resolve`]: Lexical resolution of relative paths against the cwd.

pub mod io;
pub mod resolve;

pub use io::{load_groups, InputFormat};
pub use resolve::resolve_to_cwd;
