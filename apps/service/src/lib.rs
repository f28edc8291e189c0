pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod oracle;
pub mod services;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::{load_records, MemoryStore, RecordStore};
use crate::error::Result;
use crate::models::{songs_from_records, CheckRequest, ErrorResponse, Song, TranslateVerseRequest};
use crate::oracle::{
    GlossaryTranslator, PromptedVerseTranslator, Translator, UnconfiguredModel,
    UnconfiguredTranslator,
};

/// Setting a language model provider would be configured under.
const LANGUAGE_MODEL_SETTING: &str = "LANGUAGE_MODEL";

/// Grace period for blocking tasks still running when the runtime shuts down.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(100);

/// Vocabulary and lyrics drill
#[derive(Debug, Parser)]
#[command(name = "drill", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw a practice word, favouring frequent words
    Word,
    /// Grade a translation of a word
    Check {
        #[arg(long)]
        word: String,
        #[arg(long, default_value = "")]
        answer: String,
    },
    /// Pick a random six-line verse from the lyrics table
    Verse,
    /// Translate a verse line by line in the context of its song
    TranslateVerse {
        #[arg(long)]
        artist: String,
        #[arg(long)]
        title: String,
        /// Verse text, one line per line of the song
        #[arg(long)]
        verse: String,
    },
}

/// Drive a future to completion on a fresh runtime.
///
/// Blocking tasks abandoned after a timeout get a short grace period to
/// finish; the process does not wait on them any longer than that.
pub fn block_on<F: Future>(future: F) -> anyhow::Result<F::Output> {
    let runtime = tokio::runtime::Runtime::new()?;
    let output = runtime.block_on(future);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    Ok(output)
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    match execute(&config, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            let body = ErrorResponse {
                error: e.kind().to_string(),
                message: e.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
            Err(e.into())
        }
    }
}

/// Run one command and return its JSON output.
pub async fn execute(config: &Config, command: Command) -> Result<serde_json::Value> {
    match command {
        Command::Word => {
            tracing::info!("Loading words from {}", config.words_path.display());
            let store = MemoryStore::load(&config.words_path, &config.score_column).await?;
            let prompt = services::words::random_word(
                Arc::new(store) as Arc<dyn RecordStore>,
                config.sampler,
                config.word_column.clone(),
                config.fetch_timeout,
                StdRng::from_entropy(),
            )
            .await?;
            to_json(&prompt)
        }
        Command::Check { word, answer } => {
            let translator = load_translator(config).await?;
            let request = CheckRequest {
                word: Some(word),
                answer,
            };
            let response = services::check::check_answer(
                translator.as_ref(),
                &request,
                &config.source_lang,
                &config.target_lang,
            )
            .await?;
            to_json(&response)
        }
        Command::Verse => {
            let songs = load_songs(config).await?;
            let verse = services::verses::random_verse(&songs, &mut StdRng::from_entropy())?;
            to_json(&verse)
        }
        Command::TranslateVerse {
            artist,
            title,
            verse,
        } => {
            tracing::warn!("No language model provider available, verses cannot be translated");
            let translator = PromptedVerseTranslator::new(UnconfiguredModel::new(LANGUAGE_MODEL_SETTING));
            let request = TranslateVerseRequest {
                artist,
                title,
                verse,
            };
            let response = services::verses::translate_verse(&translator, &request).await?;
            to_json(&response)
        }
    }
}

/// Songs with lyrics from the configured lyrics table.
pub async fn load_songs(config: &Config) -> Result<Vec<Song>> {
    tracing::info!("Loading songs from {}", config.lyrics_path.display());
    let records = load_records(&config.lyrics_path).await?;
    let songs = songs_from_records(&records);
    tracing::info!("{} of {} songs have lyrics", songs.len(), records.len());
    Ok(songs)
}

/// The glossary translator when GLOSSARY_PATH is set, otherwise a translator
/// that reports the missing setting.
pub async fn load_translator(config: &Config) -> Result<Box<dyn Translator>> {
    match &config.glossary_path {
        Some(path) => {
            tracing::info!("Loading glossary from {}", path.display());
            let glossary = GlossaryTranslator::load(path).await?;
            tracing::info!("Glossary has {} entries", glossary.len());
            Ok(Box::new(glossary))
        }
        None => {
            tracing::warn!("GLOSSARY_PATH not set, answers cannot be checked");
            Ok(Box::new(UnconfiguredTranslator::new("GLOSSARY_PATH")))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
