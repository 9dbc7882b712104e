// Tools Module
// One submodule per analysis tool:
// - humanizer: rewrite text, then score the rewrite locally
// - ai_detector: model judgment of AI authorship as percentages
// - plagiarism: model estimate of copied content
// - prompts: prompt templates shared by the tools

pub mod prompts;
pub mod humanizer;
pub mod ai_detector;
pub mod plagiarism;

use thiserror::Error;

use crate::services::providers::ProviderError;
use crate::services::scoring::ScoringError;

pub use ai_detector::detect_ai;
pub use humanizer::humanize;
pub use plagiarism::estimate_plagiarism;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Model call failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Model returned no humanized text")]
    EmptyRewrite,
    #[error("Model reply rejected: {0}")]
    InvalidReply(String),
    #[error("Scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::services::providers::{ChatResult, GenerationRequest, ProviderError, TextGenerator};
    use std::sync::Mutex;

    /// Generator returning a canned reply and recording the requests it saw.
    pub struct FakeGenerator {
        reply: Result<String, u16>,
        pub seen: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeGenerator {
        pub fn replying(content: &str) -> Self {
            Self {
                reply: Ok(content.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub fn last_request(&self) -> Option<GenerationRequest> {
            self.seen.lock().unwrap().last().cloned()
        }
    }

    impl TextGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<ChatResult, ProviderError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(content) => Ok(ChatResult {
                    content: content.clone(),
                    latency_ms: 1,
                }),
                Err(status) => Err(ProviderError::ApiError {
                    status: *status,
                    message: "overloaded".to_string(),
                }),
            }
        }
    }
}
