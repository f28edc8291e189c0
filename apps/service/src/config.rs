//! Service configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use drill_core::WeightedSampler;

use crate::error::{Result, ServiceError};

/// Runtime configuration.
///
/// Env vars (all optional):
/// - LYRICS_PATH: song table with artist/title/lyrics columns
/// - WORDS_PATH: word table with word and frequency score columns
/// - GLOSSARY_PATH: word/translation table used to grade answers
/// - WORD_COLUMN, SCORE_COLUMN: column names in the word table
/// - MIN_SCORE, MAX_SCORE, MAX_WEIGHT: sampler weighting
/// - SOURCE_LANG, TARGET_LANG: language pair passed to the translator
/// - FETCH_TIMEOUT_MS: timeout around one word draw
#[derive(Debug, Clone)]
pub struct Config {
    pub lyrics_path: PathBuf,
    pub words_path: PathBuf,
    pub glossary_path: Option<PathBuf>,
    pub word_column: String,
    pub score_column: String,
    pub sampler: WeightedSampler,
    pub source_lang: String,
    pub target_lang: String,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lyrics_path: PathBuf::from("data/lyrics.csv"),
            words_path: PathBuf::from("data/words.csv"),
            glossary_path: None,
            word_column: "Word".to_string(),
            score_column: "Zipf-value".to_string(),
            sampler: WeightedSampler::default(),
            source_lang: "en".to_string(),
            target_lang: "es".to_string(),
            fetch_timeout: Duration::from_millis(5000),
        }
    }
}

impl Config {
    /// Load from process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let min_score = parse_or(&get, "MIN_SCORE", defaults.sampler.min_score())?;
        let max_score = parse_or(&get, "MAX_SCORE", defaults.sampler.max_score())?;
        let max_weight = parse_or(&get, "MAX_WEIGHT", defaults.sampler.max_weight())?;
        let sampler = WeightedSampler::new(min_score, max_score, max_weight)
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        let timeout_ms = parse_or(&get, "FETCH_TIMEOUT_MS", defaults.fetch_timeout.as_millis() as u64)?;

        Ok(Self {
            lyrics_path: get("LYRICS_PATH").map(PathBuf::from).unwrap_or(defaults.lyrics_path),
            words_path: get("WORDS_PATH").map(PathBuf::from).unwrap_or(defaults.words_path),
            glossary_path: get("GLOSSARY_PATH").map(PathBuf::from),
            word_column: get("WORD_COLUMN").unwrap_or(defaults.word_column),
            score_column: get("SCORE_COLUMN").unwrap_or(defaults.score_column),
            sampler,
            source_lang: get("SOURCE_LANG").unwrap_or(defaults.source_lang),
            target_lang: get("TARGET_LANG").unwrap_or(defaults.target_lang),
            fetch_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServiceError::Config(format!("{} is not a valid number: {}", key, raw))),
        None => Ok(default),
    }
}
