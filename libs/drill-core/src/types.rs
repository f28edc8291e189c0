//! Core types for the drill library.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::verse::WINDOW_LINES;

/// One data row keyed by the header of the table it was parsed from.
///
/// All records produced by a single parse share the same header, and every
/// record holds exactly one value per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Build a record from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (columns, values): (Vec<String>, Vec<String>) = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .unzip();
        Self::new(columns.into(), values)
    }

    /// Value of the given column, if the header has it.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.values[idx].as_str())
    }

    /// First non-empty value among several alternative column names.
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|c| self.get(c))
            .find(|v| !v.is_empty())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A record annotated with the frequency score used to bias sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedRecord {
    pub record: Record,
    pub score: f64,
}

impl WeightedRecord {
    pub fn new(record: Record, score: f64) -> Self {
        Self { record, score }
    }
}

/// Six contiguous lines selected from one stanza.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseWindow {
    stanza: Vec<String>,
    start: usize,
}

impl VerseWindow {
    /// Returns `None` unless `stanza[start..start + WINDOW_LINES]` exists.
    pub fn new(stanza: Vec<String>, start: usize) -> Option<Self> {
        if start + WINDOW_LINES <= stanza.len() {
            Some(Self { stanza, start })
        } else {
            None
        }
    }

    /// The selected lines.
    pub fn lines(&self) -> &[String] {
        &self.stanza[self.start..self.start + WINDOW_LINES]
    }

    /// Zero-based offset of the first selected line within the stanza.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Every line of the stanza the window was taken from.
    pub fn stanza(&self) -> &[String] {
        &self.stanza
    }
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVerdict {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The reference the answer was compared against (shown on rejection).
    pub reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_lookup_by_column() {
        let record = Record::from_pairs([("artist", "Bad Bunny"), ("title", "Titi")]);
        assert_eq!(record.get("artist"), Some("Bad Bunny"));
        assert_eq!(record.get("lyrics"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn first_of_skips_empty_values() {
        let record = Record::from_pairs([("artists", ""), ("artist", "Rauw")]);
        assert_eq!(record.first_of(&["artists", "artist"]), Some("Rauw"));
        assert_eq!(record.first_of(&["missing"]), None);
    }

    #[test]
    fn verse_window_requires_six_lines() {
        let stanza: Vec<String> = (1..=7).map(|i| format!("line {}", i)).collect();
        assert!(VerseWindow::new(stanza.clone(), 2).is_none());

        let window = VerseWindow::new(stanza, 1).unwrap();
        assert_eq!(window.lines().len(), 6);
        assert_eq!(window.lines()[0], "line 2");
        assert_eq!(window.start(), 1);
    }
}
