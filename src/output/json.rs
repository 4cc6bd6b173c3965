//! JSON output formatter for duplicate groups.
//!
//! # Output Schema
//!
//! An array of groups, each an array of path strings, indented with four
//! spaces:
//!
//! ```json
//! [
//!     [
//!         "/path/to/file1.txt",
//!         "/path/to/file2.txt"
//!     ]
//! ]
//! ```

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::duplicates::DuplicateGroup;

use super::OutputError;

/// JSON output formatter.
pub struct JsonOutput {
    groups: Vec<Vec<String>>,
}

impl JsonOutput {
    /// Create a JSON output from duplicate groups.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup]) -> Self {
        Self {
            groups: groups.iter().map(DuplicateGroup::path_strings).collect(),
        }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), OutputError> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut writer, formatter);
        self.groups.serialize(&mut serializer)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to a pretty-printed string.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, OutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
