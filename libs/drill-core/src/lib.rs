//! Core text and sampling logic shared by the drill service.
//!
//! Provides:
//! - Answer normalization and typo-tolerant matching (Levenshtein distance)
//! - Delimited table parser for the lyrics and word datasets
//! - Verse window extraction from raw lyric text
//! - Score-weighted rejection sampling over an indexed record collection
//! - Shared types (Record, VerseWindow, WeightedRecord, MatchVerdict)

pub mod error;
pub mod matching;
pub mod parser;
pub mod sampling;
pub mod types;
pub mod verse;

pub use error::{CoreError, Result};
pub use matching::{check_answer, is_close_match, levenshtein_distance, normalize};
pub use parser::{parse, quote_field, to_delimited};
pub use sampling::{Selection, WeightedSampler, SAMPLE_ATTEMPTS};
pub use types::{MatchVerdict, Record, VerseWindow, WeightedRecord};
pub use verse::{extract_window, find_window, split_stanzas, VERSE_ATTEMPTS, WINDOW_LINES};
