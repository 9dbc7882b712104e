// Scoring Module
// Heuristic scores computed locally on rewritten text:
// - human_likeness: vocabulary length and diversity signal
// - readability: Flesch Reading Ease remapped into the display range
// - assembler: builds the humanizer response record

pub mod human_likeness;
pub mod readability;
pub mod assembler;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::text_metrics::TokenSet;

pub use human_likeness::human_score;
pub use readability::readability_score;
pub use assembler::assemble_humanized;

/// Lower bound of every displayed score.
pub const SCORE_FLOOR: f64 = 30.0;
/// Upper bound of every displayed score.
pub const SCORE_CEILING: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("text contains no words to score")]
    EmptyInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub human_score: u8,
    pub readability_score: u8,
}

/// Score a text sample. Tokenizes once and feeds both scorers.
pub fn score_text(text: &str) -> Result<ScoreResult, ScoringError> {
    let tokens = TokenSet::from_text(text);
    Ok(ScoreResult {
        human_score: human_likeness::score_tokens(&tokens)?,
        readability_score: readability::score_tokens(&tokens)?,
    })
}

/// Clamp to the display range and round half away from zero.
pub(crate) fn clamp_score(raw: f64) -> u8 {
    raw.clamp(SCORE_FLOOR, SCORE_CEILING).round() as u8
}
