//! Answer matching for translation drills.

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::types::MatchVerdict;

/// Share of the reference length that may be wrong before an answer is rejected.
const TYPO_TOLERANCE: f64 = 0.2;

/// Characters removed before comparison.
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// Normalize text for comparison.
///
/// Lowercases, strips diacritics (NFD decomposition with combining marks
/// dropped) and punctuation, collapses whitespace runs to a single space and
/// trims the ends.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // matrix[i][j]: distance between the first i chars of b and first j chars of a
    let mut matrix = vec![vec![0usize; a_chars.len() + 1]; b_chars.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=a_chars.len() {
        matrix[0][j] = j;
    }

    for i in 1..=b_chars.len() {
        for j in 1..=a_chars.len() {
            matrix[i][j] = if b_chars[i - 1] == a_chars[j - 1] {
                matrix[i - 1][j - 1]
            } else {
                1 + matrix[i - 1][j - 1] // substitution
                    .min(matrix[i][j - 1]) // insertion
                    .min(matrix[i - 1][j]) // deletion
            };
        }
    }

    matrix[b_chars.len()][a_chars.len()]
}

/// Largest edit distance still accepted for a normalized reference.
fn max_distance(normalized_reference: &str) -> usize {
    let len = normalized_reference.chars().count();
    ((len as f64 * TYPO_TOLERANCE).floor() as usize).max(1)
}

/// Whether `answer` is close enough to `reference` to count as correct.
///
/// Both sides are normalized first. Small typos are tolerated in proportion
/// to the reference length, with at least one edit allowed.
pub fn is_close_match(answer: &str, reference: &str) -> bool {
    let answer = normalize(answer);
    let reference = normalize(reference);

    if answer == reference {
        return true;
    }
    if reference.is_empty() {
        return false;
    }

    levenshtein_distance(&answer, &reference) <= max_distance(&reference)
}

/// Grade an answer, keeping the reference for display.
pub fn check_answer(answer: &str, reference: &str) -> MatchVerdict {
    MatchVerdict {
        is_correct: is_close_match(answer, reference),
        reference: reference.to_string(),
    }
}
