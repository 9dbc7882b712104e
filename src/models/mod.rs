// Textscope Data Models
// Request, response and envelope records exchanged with callers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ Requests ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolRequest {
    pub text: String,
}

// ============ Humanizer ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanizeResponse {
    pub original_text: String,
    pub humanized_text: String,
    pub human_score: u8,
    pub readability_score: u8,
}

// ============ AI Detection ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedPattern {
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiDetectionResponse {
    /// Percentage in [0, 100]
    pub ai_generated_probability: u8,
    /// Percentage in [0, 100]
    pub human_probability: u8,
    pub confidence: ConfidenceLevel,
    #[serde(default)]
    pub patterns: Vec<DetectedPattern>,
    pub words_analyzed: usize,
}

// ============ Plagiarism ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismResponse {
    pub plagiarism_percentage: u8,
}

// ============ Envelope ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Transport envelope returned by every handler.
/// `body` holds the serialized JSON of a response record or an `ErrorBody`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}
