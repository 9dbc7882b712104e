// Readability Scorer
// Flesch Reading Ease, clamped into [30, 100] for display.
// The classic scale runs below 0 and above 100; the clamp is lossy on purpose.

use super::{clamp_score, ScoringError};
use crate::services::text_metrics::TokenSet;

const FLESCH_BASE: f64 = 206.835;
const FLESCH_SENTENCE_WEIGHT: f64 = 1.015;
const FLESCH_SYLLABLE_WEIGHT: f64 = 84.6;

/// Unclamped Flesch Reading Ease for a token set.
pub fn flesch_reading_ease(tokens: &TokenSet<'_>) -> Result<f64, ScoringError> {
    if tokens.is_empty() {
        return Err(ScoringError::EmptyInput);
    }
    let words = tokens.word_count() as f64;
    // sentences is floored at 1 by the tokenizer
    let avg_sentence_len = words / tokens.sentences as f64;
    let avg_syllables_per_word = tokens.syllables as f64 / words;

    Ok(FLESCH_BASE
        - FLESCH_SENTENCE_WEIGHT * avg_sentence_len
        - FLESCH_SYLLABLE_WEIGHT * avg_syllables_per_word)
}

/// Readability score in [30, 100].
///
/// Returns `ScoringError::EmptyInput` when the text has no words.
pub fn readability_score(text: &str) -> Result<u8, ScoringError> {
    score_tokens(&TokenSet::from_text(text))
}

pub(crate) fn score_tokens(tokens: &TokenSet<'_>) -> Result<u8, ScoringError> {
    flesch_reading_ease(tokens).map(clamp_score)
}
