//! Test fixtures and factory functions for creating test data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use drill_core::{to_delimited, Record, WeightedRecord};

use drill_service::db::RecordStore;
use drill_service::error::{Result, ServiceError};
use drill_service::oracle::{LanguageModel, Translator};

/// Lyrics with a label line followed by `lines` sung lines.
pub fn stanza(label: &str, lines: usize) -> String {
    std::iter::once(format!("[{}]", label))
        .chain((1..=lines).map(|i| format!("{} line {}", label, i)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lyrics made of several stanzas separated by blank lines.
pub fn lyrics(stanzas: &[(&str, usize)]) -> String {
    stanzas
        .iter()
        .map(|(label, lines)| stanza(label, *lines))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// A lyrics table in the dataset format, one row per `(artist, title, lyrics)`.
pub fn lyrics_table(songs: &[(&str, &str, &str)]) -> String {
    let rows: Vec<Vec<String>> = songs
        .iter()
        .map(|(artist, title, lyrics)| vec![artist.to_string(), title.to_string(), lyrics.to_string()])
        .collect();
    to_delimited(&["artist", "title", "lyrics"], &rows)
}

/// A word table with `Word` and `Zipf-value` columns.
pub fn words_table(words: &[(&str, f64)]) -> String {
    let rows: Vec<Vec<String>> = words
        .iter()
        .map(|(word, score)| vec![word.to_string(), score.to_string()])
        .collect();
    to_delimited(&["Word", "Zipf-value"], &rows)
}

/// A glossary table with `word` and `translation` columns.
pub fn glossary_table(entries: &[(&str, &str)]) -> String {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|(word, translation)| vec![word.to_string(), translation.to_string()])
        .collect();
    to_delimited(&["word", "translation"], &rows)
}

/// Translator that always answers with the same text and counts calls.
pub struct FixedTranslator {
    pub reply: String,
    pub calls: AtomicUsize,
}

impl FixedTranslator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Translator whose provider is down.
pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String> {
        Err(ServiceError::Provider("quota exceeded".to_string()))
    }
}

/// Language model returning a canned reply (or provider error) and counting prompts.
pub struct ScriptedModel {
    pub reply: std::result::Result<String, String>,
    pub prompts: AtomicUsize,
}

impl ScriptedModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: AtomicUsize::new(0),
        }
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().map_err(ServiceError::Provider)
    }
}

/// Store that takes `delay` to answer every call.
pub struct SlowStore {
    pub delay: Duration,
}

impl RecordStore for SlowStore {
    fn count(&self) -> Result<usize> {
        std::thread::sleep(self.delay);
        Ok(1)
    }

    fn fetch_range(&self, _offset: usize, _limit: usize) -> Result<Vec<Record>> {
        Ok(vec![])
    }

    fn fetch_top_by_score(&self, _limit: usize) -> Result<Vec<Record>> {
        Ok(vec![])
    }

    fn fetch_scored(&self, _offset: usize) -> Result<Option<WeightedRecord>> {
        Ok(None)
    }
}

/// Store that counts fine but fails every row fetch.
pub struct BrokenStore;

impl RecordStore for BrokenStore {
    fn count(&self) -> Result<usize> {
        Ok(3)
    }

    fn fetch_range(&self, _offset: usize, _limit: usize) -> Result<Vec<Record>> {
        Err(ServiceError::Store("connection reset".to_string()))
    }

    fn fetch_top_by_score(&self, _limit: usize) -> Result<Vec<Record>> {
        Err(ServiceError::Store("connection reset".to_string()))
    }

    fn fetch_scored(&self, _offset: usize) -> Result<Option<WeightedRecord>> {
        Err(ServiceError::Store("connection reset".to_string()))
    }
}
