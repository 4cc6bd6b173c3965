//! Plain text output: one line per group, each path in double quotes.

use std::io::Write;

use crate::duplicates::DuplicateGroup;

use super::OutputError;

/// Plain text output formatter.
pub struct PlainOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> PlainOutput<'a> {
    /// Create a new plain formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write every group as a line of space-separated quoted paths.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), OutputError> {
        for group in self.groups {
            let line: Vec<String> = group.path_strings().iter().map(|p| quote(p)).collect();
            writeln!(writer, "{}", line.join(" "))?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn quote(path: &str) -> String {
    format!("\"{}\"", path.replace('\\', "\\\\").replace('"', "\\\""))
}
