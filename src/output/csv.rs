//! CSV output formatter for duplicate groups.
//!
//! One row per group. The header is sized to the widest group and shorter
//! rows are left unpadded:
//!
//! ```text
//! Count,Path,Path,Path
//! 3,/a/x.txt,/b/x.txt,/c/x.txt
//! 2,/a/y.txt,/b/y.txt
//! ```
//!
//! # Example
//!
//! ```
//! use dupefind::duplicates::DuplicateGroup;
//! use dupefind::output::csv::CsvOutput;
//!
//! let groups = vec![DuplicateGroup::from_strings(vec!["/a".into(), "/b".into()])];
//! let csv = CsvOutput::new(&groups).to_string().unwrap();
//! assert_eq!(csv, "Count,Path,Path\n2,/a,/b\n");
//! ```

use std::io;

use crate::duplicates::DuplicateGroup;

use super::OutputError;

/// CSV output formatter.
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), OutputError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        let widest = self.groups.iter().map(DuplicateGroup::len).max().unwrap_or(0);
        let header = std::iter::once("Count").chain(std::iter::repeat("Path").take(widest));
        csv_writer.write_record(header)?;

        for group in self.groups {
            let row = std::iter::once(group.len().to_string()).chain(group.path_strings());
            csv_writer.write_record(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, OutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
