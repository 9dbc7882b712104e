// Plagiarism Estimator
// Asks the model for a percentage and validates it before returning

use serde::Deserialize;
use tracing::{info, warn};

use super::prompts::plagiarism_prompt;
use super::ToolError;
use crate::models::PlagiarismResponse;
use crate::services::config_store::GenerationConfig;
use crate::services::model_reply::{parse_model_reply, ModelReply};
use crate::services::providers::{GenerationRequest, TextGenerator};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlagiarismEstimate {
    plagiarism_percentage: f64,
}

pub async fn estimate_plagiarism<G: TextGenerator>(
    generator: &G,
    params: &GenerationConfig,
    text: &str,
) -> Result<PlagiarismResponse, ToolError> {
    let request = GenerationRequest::new(plagiarism_prompt(text), params);
    let reply = generator.generate(&request).await?;

    let response = interpret_reply(&reply.content)?;
    info!(
        "[PLAGIARISM] estimate ok latency_ms={} plagiarism_percentage={}",
        reply.latency_ms, response.plagiarism_percentage
    );
    Ok(response)
}

fn interpret_reply(content: &str) -> Result<PlagiarismResponse, ToolError> {
    let estimate = match parse_model_reply::<PlagiarismEstimate>(content) {
        ModelReply::Parsed(estimate) => estimate,
        ModelReply::Malformed { reason, raw } => {
            warn!("[PLAGIARISM] malformed reply: {} raw_len={}", reason, raw.len());
            return Err(ToolError::InvalidReply(reason));
        }
    };

    let value = estimate.plagiarism_percentage;
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(ToolError::InvalidReply(format!(
            "plagiarismPercentage out of range: {}",
            value
        )));
    }

    Ok(PlagiarismResponse {
        plagiarism_percentage: value.round() as u8,
    })
}
