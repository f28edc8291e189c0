//! Common test utilities for integration tests.
//!
//! Provides a TestContext that writes dataset files into a temporary
//! directory and a Config pointing at them.

pub mod fixtures;

use std::path::PathBuf;

use tempfile::TempDir;

use drill_service::config::Config;

/// Temporary dataset directory plus a config that reads from it.
pub struct TestContext {
    dir: TempDir,
    pub config: Config,
}

impl TestContext {
    /// Create a context with the given words and lyrics tables and no glossary.
    pub fn new(words_table: &str, lyrics_table: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = Config::default();
        config.words_path = write(&dir, "words.csv", words_table);
        config.lyrics_path = write(&dir, "lyrics.csv", lyrics_table);

        Self { dir, config }
    }

    /// Add a glossary file and point the config at it.
    pub fn with_glossary(mut self, glossary_table: &str) -> Self {
        self.config.glossary_path = Some(write(&self.dir, "glossary.csv", glossary_table));
        self
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}
