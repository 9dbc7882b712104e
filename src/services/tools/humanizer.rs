// Humanizer
// Rewrites text through the model, then scores the rewrite locally

use tracing::{debug, info};

use super::prompts::humanize_prompt;
use super::ToolError;
use crate::models::HumanizeResponse;
use crate::services::config_store::GenerationConfig;
use crate::services::providers::{GenerationRequest, TextGenerator};
use crate::services::scoring::assemble_humanized;
use crate::services::text_metrics::word_count;

/// Rewrite `text` and attach human-likeness and readability scores.
/// `text` must already be validated as non-blank.
pub async fn humanize<G: TextGenerator>(
    generator: &G,
    params: &GenerationConfig,
    text: &str,
) -> Result<HumanizeResponse, ToolError> {
    let request = GenerationRequest::new(humanize_prompt(text), params);
    let reply = generator.generate(&request).await?;

    let rewritten = reply.content.trim();
    if rewritten.is_empty() {
        return Err(ToolError::EmptyRewrite);
    }

    let response = assemble_humanized(text, rewritten)?;
    info!(
        "[HUMANIZER] rewrite ok latency_ms={} input_words={} output_words={} human_score={} readability_score={}",
        reply.latency_ms,
        word_count(text),
        word_count(rewritten),
        response.human_score,
        response.readability_score
    );
    debug!(original = %text, humanized = %rewritten, "humanizer.texts");

    Ok(response)
}
