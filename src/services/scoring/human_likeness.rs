// Human-Likeness Scorer
// Long and varied vocabulary is read as a weak signal of natural human writing.

use std::collections::HashSet;

use super::{clamp_score, ScoringError};
use crate::services::text_metrics::TokenSet;

/// Words longer than this many characters count as long.
const LONG_WORD_MIN_CHARS: usize = 7;
const LONG_WORD_WEIGHT: f64 = 0.5;
const UNIQUE_WORD_WEIGHT: f64 = 0.5;

/// Human-likeness score in [30, 100].
///
/// Returns `ScoringError::EmptyInput` when the text has no words.
pub fn human_score(text: &str) -> Result<u8, ScoringError> {
    score_tokens(&TokenSet::from_text(text))
}

pub(crate) fn score_tokens(tokens: &TokenSet<'_>) -> Result<u8, ScoringError> {
    if tokens.is_empty() {
        return Err(ScoringError::EmptyInput);
    }

    let total = tokens.word_count() as f64;

    // Length is counted in chars, so punctuation attached to a token counts too.
    let long_words = tokens
        .words
        .iter()
        .filter(|w| w.chars().count() >= LONG_WORD_MIN_CHARS)
        .count();
    let unique_words: HashSet<&str> = tokens.words.iter().copied().collect();

    let long_word_ratio = long_words as f64 / total;
    let unique_word_ratio = unique_words.len() as f64 / total;

    let raw = 100.0 * (LONG_WORD_WEIGHT * long_word_ratio + UNIQUE_WORD_WEIGHT * unique_word_ratio);
    Ok(clamp_score(raw))
}
