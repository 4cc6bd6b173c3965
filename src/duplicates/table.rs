//! The match table: metric → measure → files sharing that measure.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{Measure, Metric};

/// Candidate groups at every level of the metric ladder.
///
/// Lists preserve insertion order, so the first entry of a list is always the
/// file that was alone at that `(metric, measure)` before any collision.
#[derive(Debug, Default)]
pub struct MatchTable {
    levels: HashMap<Metric, HashMap<Measure, Vec<PathBuf>>>,
}

impl MatchTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `file` to the list at `(metric, measure)` and return that list.
    pub fn insert(&mut self, metric: Metric, measure: Measure, file: PathBuf) -> &[PathBuf] {
        let similar = self
            .levels
            .entry(metric)
            .or_default()
            .entry(measure)
            .or_default();
        similar.push(file);
        similar
    }

    /// All `(measure, files)` pairs recorded at one metric.
    pub fn level(&self, metric: Metric) -> impl Iterator<Item = (&Measure, &[PathBuf])> {
        self.levels
            .get(&metric)
            .into_iter()
            .flat_map(|level| level.iter().map(|(m, files)| (m, files.as_slice())))
    }

    /// Total number of file entries recorded at one metric.
    #[must_use]
    pub fn entries_at(&self, metric: Metric) -> usize {
        self.level(metric).map(|(_, files)| files.len()).sum()
    }

    /// Check if nothing has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.values().all(HashMap::is_empty)
    }
}
