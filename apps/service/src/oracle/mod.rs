//! Translation collaborators.
//!
//! The translation providers themselves live outside this workspace; these
//! traits are the seams the services call through. A local glossary stands in
//! for the word translator, and verse translation is driven through any text
//! generation model via [`PromptedVerseTranslator`].

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use drill_core::Record;
use serde::Deserialize;

use crate::db::load_records;
use crate::error::{Result, ServiceError};

/// Translates a single word or phrase.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String>;
}

/// Translates the lines of a verse, one output line per input line.
#[async_trait]
pub trait VerseTranslator: Send + Sync {
    async fn translate_verse_lines(
        &self,
        artist: &str,
        title: &str,
        lines: &[String],
    ) -> Result<Vec<String>>;
}

/// A text generation model answering a free-form prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Word translator backed by a two-column lookup table.
#[derive(Debug, Clone, Default)]
pub struct GlossaryTranslator {
    entries: HashMap<String, String>,
}

impl GlossaryTranslator {
    pub const WORD_COLUMN: &'static str = "word";
    pub const TRANSLATION_COLUMN: &'static str = "translation";

    /// Build from records with `word` and `translation` columns.
    ///
    /// Lookups are case-insensitive on the source word.
    pub fn from_records(records: &[Record]) -> Self {
        let entries = records
            .iter()
            .filter_map(|r| {
                let word = r.get(Self::WORD_COLUMN)?.trim();
                let translation = r.get(Self::TRANSLATION_COLUMN)?.trim();
                (!word.is_empty()).then(|| (word.to_lowercase(), translation.to_string()))
            })
            .collect();
        Self { entries }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let records = load_records(path).await?;
        Ok(Self::from_records(&records))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl Translator for GlossaryTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        self.entries
            .get(&text.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| {
                ServiceError::Provider(format!(
                    "no {}->{} translation for \"{}\"",
                    source_lang, target_lang, text
                ))
            })
    }
}

/// Stand-in used when no translation provider is configured.
#[derive(Debug, Clone)]
pub struct UnconfiguredTranslator {
    setting: String,
}

impl UnconfiguredTranslator {
    pub fn new(setting: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
        }
    }
}

#[async_trait]
impl Translator for UnconfiguredTranslator {
    async fn translate(&self, _text: &str, _source_lang: &str, _target_lang: &str) -> Result<String> {
        Err(ServiceError::Config(format!(
            "translation provider not configured: set {}",
            self.setting
        )))
    }
}

/// Stand-in used when no text generation model is configured.
#[derive(Debug, Clone)]
pub struct UnconfiguredModel {
    setting: String,
}

impl UnconfiguredModel {
    pub fn new(setting: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
        }
    }
}

#[async_trait]
impl LanguageModel for UnconfiguredModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(ServiceError::Config(format!(
            "language model not configured: set {}",
            self.setting
        )))
    }
}

/// Verse translator that prompts a language model for strict JSON output.
pub struct PromptedVerseTranslator<M> {
    model: M,
}

impl<M: LanguageModel> PromptedVerseTranslator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> VerseTranslator for PromptedVerseTranslator<M> {
    async fn translate_verse_lines(
        &self,
        artist: &str,
        title: &str,
        lines: &[String],
    ) -> Result<Vec<String>> {
        let prompt = verse_prompt(artist, title, lines);
        let reply = self.model.generate(&prompt).await?;

        let translated = parse_verse_lines(&reply).ok_or_else(|| {
            ServiceError::Provider("Failed to parse verse translation response".to_string())
        })?;
        if translated.len() != lines.len() {
            return Err(ServiceError::Provider(format!(
                "verse translation has {} lines, expected {}",
                translated.len(),
                lines.len()
            )));
        }

        Ok(translated)
    }
}

/// Prompt asking for a contextual, line-aligned translation.
pub fn verse_prompt(artist: &str, title: &str, lines: &[String]) -> String {
    format!(
        "Translate the following verse from {artist}'s \"{title}\" into English, being as \
         contextual as possible. Reflect what the artist is trying to express rather than \
         translating word for word; read it as someone fluent in both the artist's Spanish \
         and American English would.\n\n\
         Return JSON strictly in the form: {{ \"lines\": [\"line1\", \"line2\", ...] }} where \
         the number of lines matches the input verse lines (split by newline). Do not include \
         any additional properties.\n\n\
         Input verse (keep line boundaries):\n\n{verse}",
        artist = artist,
        title = title,
        verse = lines.join("\n"),
    )
}

#[derive(Deserialize)]
struct LinesReply {
    lines: Vec<String>,
}

/// Pull the `lines` array out of a model reply.
///
/// Accepts bare JSON, JSON inside a fenced code block, or JSON surrounded by
/// prose.
pub fn parse_verse_lines(reply: &str) -> Option<Vec<String>> {
    let candidate = fenced_block(reply).unwrap_or(reply).trim();

    if let Ok(parsed) = serde_json::from_str::<LinesReply>(candidate) {
        return Some(parsed.lines);
    }

    let start = candidate.find('{').or_else(|| candidate.find('['))?;
    let end = candidate.rfind(|c: char| c == '}' || c == ']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<LinesReply>(&candidate[start..=end])
        .ok()
        .map(|parsed| parsed.lines)
}

/// Body of the first ```-fenced block, without its language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    let close = after_open.find("```")?;
    let block = &after_open[..close];

    let tag_len = block
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(block.len());
    let body = &block[tag_len..];
    Some(body.strip_prefix('\n').unwrap_or(body))
}
