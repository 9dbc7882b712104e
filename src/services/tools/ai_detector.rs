// AI Detector
// Model judgment of AI authorship, normalized into integer percentages
//
// Probabilities are expected as fractions in [0, 1]. Values in (1, 100] are
// taken as percentages already; anything else rejects the reply.

use serde::Deserialize;
use tracing::{info, warn};

use super::prompts::ai_detection_prompt;
use super::ToolError;
use crate::models::{AiDetectionResponse, ConfidenceLevel, DetectedPattern};
use crate::services::config_store::GenerationConfig;
use crate::services::model_reply::{parse_model_reply, ModelReply};
use crate::services::providers::{GenerationRequest, TextGenerator};
use crate::services::text_metrics::word_count;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AiJudgment {
    ai_generated_probability: f64,
    #[serde(default)]
    human_probability: Option<f64>,
    confidence: ConfidenceLevel,
    #[serde(default)]
    patterns: Vec<DetectedPattern>,
}

/// Judge whether `text` is AI-generated. `text` must be trimmed and non-blank.
pub async fn detect_ai<G: TextGenerator>(
    generator: &G,
    params: &GenerationConfig,
    text: &str,
) -> Result<AiDetectionResponse, ToolError> {
    let request = GenerationRequest::new(ai_detection_prompt(text), params);
    let reply = generator.generate(&request).await?;

    let response = interpret_reply(&reply.content, word_count(text))?;
    info!(
        "[AI_DETECTOR] judgment ok latency_ms={} ai={} human={} confidence={:?} patterns={} words={}",
        reply.latency_ms,
        response.ai_generated_probability,
        response.human_probability,
        response.confidence,
        response.patterns.len(),
        response.words_analyzed
    );
    Ok(response)
}

fn interpret_reply(content: &str, words_analyzed: usize) -> Result<AiDetectionResponse, ToolError> {
    let judgment = match parse_model_reply::<AiJudgment>(content) {
        ModelReply::Parsed(judgment) => judgment,
        ModelReply::Malformed { reason, raw } => {
            warn!("[AI_DETECTOR] malformed reply: {} raw_len={}", reason, raw.len());
            return Err(ToolError::InvalidReply(reason));
        }
    };

    let ai = to_percentage(judgment.ai_generated_probability, "aiGeneratedProbability")?;
    let human = match judgment.human_probability {
        Some(p) => to_percentage(p, "humanProbability")?,
        None => 100 - ai,
    };

    Ok(AiDetectionResponse {
        ai_generated_probability: ai,
        human_probability: human,
        confidence: judgment.confidence,
        patterns: judgment.patterns,
        words_analyzed,
    })
}

/// Convert a model probability into an integer percentage.
pub fn to_percentage(value: f64, field: &str) -> Result<u8, ToolError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ToolError::InvalidReply(format!("{} out of range: {}", field, value)));
    }
    if value <= 1.0 {
        return Ok((value * 100.0).round() as u8);
    }
    if value <= 100.0 {
        warn!("[AI_DETECTOR] {} given as percentage: {}", field, value);
        return Ok(value.round() as u8);
    }
    Err(ToolError::InvalidReply(format!("{} out of range: {}", field, value)))
}
