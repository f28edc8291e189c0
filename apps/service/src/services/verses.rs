//! Verse selection and translation

use drill_core::{find_window, VERSE_ATTEMPTS};
use rand::Rng;

use crate::error::{Result, ServiceError};
use crate::models::{Song, TranslateVerseRequest, VerseResponse, VerseTranslationResponse};
use crate::oracle::VerseTranslator;

/// Pick a random six-line verse from the songs.
///
/// Songs are redrawn up to [`VERSE_ATTEMPTS`] times when the chosen one has
/// no stanza long enough.
pub fn random_verse<R: Rng + ?Sized>(songs: &[Song], rng: &mut R) -> Result<VerseResponse> {
    if songs.is_empty() {
        return Err(ServiceError::NotFound("No songs available".to_string()));
    }

    let Some((song, window)) = find_window(songs, |s| s.lyrics.as_str(), rng, VERSE_ATTEMPTS) else {
        tracing::warn!("No verse found after {} attempts", VERSE_ATTEMPTS);
        return Err(ServiceError::NotFound(
            "Could not find verse with 6 lines".to_string(),
        ));
    };

    tracing::info!(
        artist = %song.artist,
        title = %song.title,
        start = window.start(),
        "Selected verse"
    );

    Ok(VerseResponse {
        artist: song.artist.clone(),
        title: song.title.clone(),
        verse: window.stanza().join("\n"),
        lines: window.lines().to_vec(),
        start_index: window.start(),
    })
}

/// Translate a verse line by line.
pub async fn translate_verse(
    translator: &dyn VerseTranslator,
    request: &TranslateVerseRequest,
) -> Result<VerseTranslationResponse> {
    if request.artist.is_empty() || request.title.is_empty() || request.verse.is_empty() {
        return Err(ServiceError::Input(
            "Missing artist, title or verse".to_string(),
        ));
    }

    let lines: Vec<String> = request.verse.lines().map(str::to_string).collect();
    let translated = translator
        .translate_verse_lines(&request.artist, &request.title, &lines)
        .await?;

    tracing::info!(
        artist = %request.artist,
        title = %request.title,
        lines = translated.len(),
        "Translated verse"
    );

    Ok(VerseTranslationResponse { lines: translated })
}
