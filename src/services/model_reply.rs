// Model Reply Parsing
// Models wrap their JSON answer in free-form text; pull the object out and
// report failures as a value instead of an error path.

use serde::de::DeserializeOwned;

/// Outcome of interpreting a model's reply as structured JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply<T> {
    Parsed(T),
    Malformed { reason: String, raw: String },
}

impl<T> ModelReply<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ModelReply::Parsed(_))
    }

    /// Convert to a `Result`, keeping only the failure reason.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            ModelReply::Parsed(value) => Ok(value),
            ModelReply::Malformed { reason, .. } => Err(reason),
        }
    }
}

/// Parse the JSON object embedded in `content` into `T`.
pub fn parse_model_reply<T: DeserializeOwned>(content: &str) -> ModelReply<T> {
    let json_str = match extract_json(content.trim()) {
        Ok(s) => s,
        Err(reason) => {
            return ModelReply::Malformed {
                reason,
                raw: content.to_string(),
            }
        }
    };

    match serde_json::from_str::<T>(json_str) {
        Ok(value) => ModelReply::Parsed(value),
        Err(e) => ModelReply::Malformed {
            reason: format!("JSON parse error: {}", e),
            raw: content.to_string(),
        },
    }
}

/// Slice from the first `{` to the last `}` of the reply, dropping any prose
/// before or after the object.
pub fn extract_json(content: &str) -> Result<&str, String> {
    let Some(start) = content.find('{') else {
        return Err("No JSON in response".to_string());
    };
    match content.rfind('}') {
        Some(end) if end > start => Ok(&content[start..=end]),
        _ => Err("Invalid JSON response".to_string()),
    }
}
