//! Dataset and response types

use drill_core::Record;
use serde::{Deserialize, Serialize};

/// Column names accepted for each song field, in priority order.
const ARTIST_COLUMNS: &[&str] = &["artists", "artist"];
const TITLE_COLUMNS: &[&str] = &["title", "title_with_featured"];
const LYRICS_COLUMNS: &[&str] = &["lyrics", "LYRICS"];

/// One song from the lyrics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub artist: String,
    pub title: String,
    pub lyrics: String,
}

impl Song {
    /// Read a song from a record, or `None` when it has no lyrics.
    pub fn from_record(record: &Record) -> Option<Self> {
        let lyrics = record.first_of(LYRICS_COLUMNS)?;
        Some(Self {
            artist: record.first_of(ARTIST_COLUMNS).unwrap_or_default().to_string(),
            title: record.first_of(TITLE_COLUMNS).unwrap_or_default().to_string(),
            lyrics: lyrics.to_string(),
        })
    }
}

/// Songs that have lyrics, in table order.
pub fn songs_from_records(records: &[Record]) -> Vec<Song> {
    records.iter().filter_map(Song::from_record).collect()
}

/// A word to translate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPrompt {
    pub word: String,
    /// True when every weighted draw was rejected and the top word was used.
    pub fallback: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckRequest {
    pub word: Option<String>,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub correct: bool,
    pub translation: String,
}

/// A six-line verse picked from a song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseResponse {
    pub artist: String,
    pub title: String,
    /// The whole stanza the lines come from.
    pub verse: String,
    pub lines: Vec<String>,
    pub start_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateVerseRequest {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub verse: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerseTranslationResponse {
    pub lines: Vec<String>,
}

/// Error body printed by the command line tool
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::parse;

    #[test]
    fn song_columns_are_aliased() {
        let records = parse("artists,title_with_featured,LYRICS\nBad Bunny,Titi (feat. X),la la\n");
        let song = Song::from_record(&records[0]).unwrap();
        assert_eq!(song.artist, "Bad Bunny");
        assert_eq!(song.title, "Titi (feat. X)");
        assert_eq!(song.lyrics, "la la");
    }

    #[test]
    fn songs_without_lyrics_are_skipped() {
        let records = parse("artist,title,lyrics\nA,One,\nB,Two,words\n");
        let songs = songs_from_records(&records);
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Two");
    }

    #[test]
    fn verse_response_uses_camel_case() {
        let response = VerseResponse {
            artist: "A".to_string(),
            title: "T".to_string(),
            verse: "l1".to_string(),
            lines: vec!["l1".to_string()],
            start_index: 2,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["startIndex"], 2);
    }

    #[test]
    fn check_request_answer_defaults_to_empty() {
        let request: CheckRequest = serde_json::from_str(r#"{"word":"dog"}"#).unwrap();
        assert_eq!(request.word.as_deref(), Some("dog"));
        assert_eq!(request.answer, "");
    }
}
