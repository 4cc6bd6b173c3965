//! Loading saved duplicate-group lists.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::duplicates::DuplicateGroup;

/// Format of a saved group list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// `Count,Path,...` rows after a header row
    Csv,
    /// Array of arrays of path strings
    #[default]
    Json,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Csv => write!(f, "csv"),
            InputFormat::Json => write!(f, "json"),
        }
    }
}

/// Read a group list from `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened or is not valid for `format`.
pub fn load_groups(path: &Path, format: InputFormat) -> Result<Vec<DuplicateGroup>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let groups = match format {
        InputFormat::Json => read_json(file),
        InputFormat::Csv => read_csv(file),
    }
    .with_context(|| format!("Failed to parse {} input file: {}", format, path.display()))?;

    log::debug!("Loaded {} groups from {}", groups.len(), path.display());
    Ok(groups)
}

/// Parse a JSON array of arrays of path strings.
///
/// # Errors
///
/// Returns an error if the input is not an array of arrays of strings.
pub fn read_json<R: std::io::Read>(reader: R) -> Result<Vec<DuplicateGroup>> {
    let raw: Vec<Vec<String>> =
        serde_json::from_reader(reader).context("Expected an array of arrays of paths")?;
    Ok(raw.into_iter().map(DuplicateGroup::from_strings).collect())
}

/// Parse CSV rows of `count, path, path, ...`.
///
/// The header row is skipped, as is the leading count column of each row.
/// Rows may have differing lengths; empty fields are ignored. Fields are
/// taken verbatim, since leading or trailing spaces can be part of a name.
///
/// # Errors
///
/// Returns an error if the input is not well-formed CSV.
pub fn read_csv<R: std::io::Read>(reader: R) -> Result<Vec<DuplicateGroup>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut groups = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", idx + 2))?;
        let paths: Vec<String> = record
            .iter()
            .skip(1)
            .filter(|field| !field.is_empty())
            .map(ToString::to_string)
            .collect();
        groups.push(DuplicateGroup::from_strings(paths));
    }
    Ok(groups)
}
