//! Record store seam and the in-memory store backed by parsed tables

use std::path::Path;

use drill_core::{parse, Record, WeightedRecord};

use crate::error::Result;

/// Indexed, score-ordered access to a word collection.
///
/// The sampler only ever asks for one row at a time, so implementations can
/// sit in front of a collection too large to load.
pub trait RecordStore: Send + Sync {
    /// Number of rows in the collection.
    fn count(&self) -> Result<usize>;

    /// Rows `offset..offset + limit`, in storage order.
    fn fetch_range(&self, offset: usize, limit: usize) -> Result<Vec<Record>>;

    /// The `limit` highest-scoring rows, best first.
    fn fetch_top_by_score(&self, limit: usize) -> Result<Vec<Record>>;

    /// The row at `offset` with its score.
    fn fetch_scored(&self, offset: usize) -> Result<Option<WeightedRecord>>;
}

/// Read a table file and parse it into records.
pub async fn load_records(path: &Path) -> Result<Vec<Record>> {
    let text = tokio::fs::read_to_string(path).await?;
    let records = parse(&text);
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Word collection held in memory, scored by one of its columns.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    rows: Vec<WeightedRecord>,
}

impl MemoryStore {
    /// Build a store, reading each row's score from `score_column`.
    ///
    /// Rows whose score is missing or not a number get NaN, which the sampler
    /// never accepts and which never ranks in the top rows.
    pub fn new(records: Vec<Record>, score_column: &str) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let score = record
                    .get(score_column)
                    .and_then(|raw| raw.trim().parse::<f64>().ok())
                    .unwrap_or(f64::NAN);
                WeightedRecord::new(record, score)
            })
            .collect();
        Self { rows }
    }

    pub async fn load(path: &Path, score_column: &str) -> Result<Self> {
        let records = load_records(path).await?;
        Ok(Self::new(records, score_column))
    }
}

impl RecordStore for MemoryStore {
    fn count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }

    fn fetch_range(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
        Ok(self
            .rows
            .iter()
            .skip(offset)
            .take(limit)
            .map(|row| row.record.clone())
            .collect())
    }

    fn fetch_top_by_score(&self, limit: usize) -> Result<Vec<Record>> {
        let mut scored: Vec<&WeightedRecord> =
            self.rows.iter().filter(|row| !row.score.is_nan()).collect();
        // stable sort keeps file order among equal scores
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(scored
            .into_iter()
            .take(limit)
            .map(|row| row.record.clone())
            .collect())
    }

    fn fetch_scored(&self, offset: usize) -> Result<Option<WeightedRecord>> {
        Ok(self.rows.get(offset).cloned())
    }
}
