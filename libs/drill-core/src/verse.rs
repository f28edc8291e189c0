//! Verse window extraction from raw lyric text.
//!
//! Lyrics are split into stanzas on blank lines. The first line of every
//! block is dropped: in the lyrics dataset it holds a section label such as
//! `[Coro: Bad Bunny]` rather than a sung line. Stanzas shorter than
//! [`WINDOW_LINES`] are ignored, and one window of exactly that many
//! contiguous lines is taken from a random qualifying stanza.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::VerseWindow;

/// Number of lines in a verse window.
pub const WINDOW_LINES: usize = 6;

/// How many candidates are tried before giving up on finding a verse.
pub const VERSE_ATTEMPTS: usize = 20;

/// Split lyrics into stanzas, each with its first line dropped.
pub fn split_stanzas(lyrics: &str) -> Vec<Vec<String>> {
    let text = lyrics.replace("\r\n", "\n").replace('\r', "\n");

    let mut stanzas = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            close_stanza(&mut current, &mut stanzas);
        } else {
            current.push(line.to_string());
        }
    }
    close_stanza(&mut current, &mut stanzas);

    stanzas
}

fn close_stanza(current: &mut Vec<String>, stanzas: &mut Vec<Vec<String>>) {
    if current.is_empty() {
        return;
    }
    let mut block = std::mem::take(current);
    block.remove(0);
    stanzas.push(block);
}

/// Pick a random six-line window from the lyrics, if any stanza is long enough.
pub fn extract_window<R: Rng + ?Sized>(lyrics: &str, rng: &mut R) -> Option<VerseWindow> {
    let qualifying: Vec<Vec<String>> = split_stanzas(lyrics)
        .into_iter()
        .filter(|stanza| stanza.len() >= WINDOW_LINES)
        .collect();

    let stanza = qualifying.choose(rng)?.clone();
    let start = if stanza.len() == WINDOW_LINES {
        0
    } else {
        rng.gen_range(0..=stanza.len() - WINDOW_LINES)
    };

    VerseWindow::new(stanza, start)
}

/// Draw candidates at random until one yields a verse window.
///
/// Gives up after `attempts` draws; candidates that yield nothing are simply
/// redrawn, so one item may be tried more than once.
pub fn find_window<'a, T, F, R>(
    candidates: &'a [T],
    lyrics_of: F,
    rng: &mut R,
    attempts: usize,
) -> Option<(&'a T, VerseWindow)>
where
    F: Fn(&T) -> &str,
    R: Rng + ?Sized,
{
    for _ in 0..attempts {
        let candidate = candidates.choose(rng)?;
        if let Some(window) = extract_window(lyrics_of(candidate), rng) {
            return Some((candidate, window));
        }
    }
    None
}
