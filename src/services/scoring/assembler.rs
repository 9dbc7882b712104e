// Response Assembler
// Joins the rewritten text with its local scores

use super::{score_text, ScoringError};
use crate::models::HumanizeResponse;

/// Build the humanizer response. Scores are computed on the rewritten text.
pub fn assemble_humanized(
    original_text: &str,
    humanized_text: &str,
) -> Result<HumanizeResponse, ScoringError> {
    let scores = score_text(humanized_text)?;
    Ok(HumanizeResponse {
        original_text: original_text.to_string(),
        humanized_text: humanized_text.to_string(),
        human_score: scores.human_score,
        readability_score: scores.readability_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_scores_rewritten_text() {
        let resp = assemble_humanized(
            "the the the the the the",
            "The cat sat on the mat.",
        )
        .unwrap();
        assert_eq!(resp.original_text, "the the the the the the");
        assert_eq!(resp.humanized_text, "The cat sat on the mat.");
        assert_eq!(resp.readability_score, 100);
        // "The" and "the" differ, so 6 of 6 distinct and none long
        assert_eq!(resp.human_score, 50);
    }

    #[test]
    fn test_assemble_empty_rewrite_rejected() {
        assert_eq!(
            assemble_humanized("original", " "),
            Err(ScoringError::EmptyInput)
        );
    }
}
