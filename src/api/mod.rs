// Request Handlers
// Decode a JSON event, run one tool and wrap the outcome in a transport envelope

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{ErrorBody, HandlerResponse};
use crate::services::config_store::ToolsConfig;
use crate::services::providers::TextGenerator;
use crate::services::tools::{self, ToolError};

const MSG_INVALID_BODY: &str = "Invalid request body.";
const MSG_TEXT_REQUIRED: &str = "Text input is required.";
const MSG_HUMANIZE_TEXT_MISSING: &str = "Missing 'text' in request";
const MSG_NO_HUMANIZED_TEXT: &str = "Model returned no humanized text";
const MSG_INTERNAL: &str = "Internal server error.";

/// Long-lived handler state: the injected generator and per-tool parameters.
/// Built once at startup and shared by reference with every request.
pub struct AppState<G> {
    pub generator: G,
    pub tools: ToolsConfig,
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(generator: G, tools: ToolsConfig) -> Self {
        Self { generator, tools }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tool {
    Humanize,
    DetectAi,
    Plagiarism,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Humanize => "humanize",
            Tool::DetectAi => "detect",
            Tool::Plagiarism => "plagiarism",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val.trim().to_lowercase().as_str() {
            "humanize" | "humanizer" => Ok(Tool::Humanize),
            "detect" | "ai-detect" | "ai_detector" | "detect-ai" => Ok(Tool::DetectAi),
            "plagiarism" => Ok(Tool::Plagiarism),
            other => Err(format!("unknown tool: {}", other)),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum RequestError {
    InvalidBody,
    MissingText,
}

/// Pull the `text` field out of an event.
///
/// A non-empty string `body` is parsed as JSON; an object `body` is used
/// directly; a missing, null or empty-string `body` leaves the event itself as
/// the payload. Returns the text as sent.
fn extract_text(event: &Value) -> Result<String, RequestError> {
    let parsed;
    let payload = match event.get("body") {
        Some(Value::String(raw)) if raw.is_empty() => event,
        Some(Value::String(raw)) => {
            parsed = serde_json::from_str::<Value>(raw).map_err(|_| RequestError::InvalidBody)?;
            &parsed
        }
        Some(body) if body.is_object() => body,
        Some(Value::Null) | None => event,
        Some(_) => return Err(RequestError::InvalidBody),
    };

    match payload.get("text").and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => Err(RequestError::MissingText),
    }
}

fn base_headers(request_id: &Uuid) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("X-Request-Id".to_string(), request_id.to_string());
    headers
}

fn json_response<T: Serialize>(status_code: u16, body: &T, request_id: &Uuid) -> HandlerResponse {
    match serde_json::to_string(body) {
        Ok(body) => HandlerResponse {
            status_code,
            headers: base_headers(request_id),
            body,
        },
        Err(e) => {
            error!("[API] response serialization failed: {}", e);
            HandlerResponse {
                status_code: 500,
                headers: base_headers(request_id),
                body: format!("{{\"error\":\"{}\"}}", MSG_INTERNAL),
            }
        }
    }
}

fn error_response(status_code: u16, message: &str, request_id: &Uuid) -> HandlerResponse {
    json_response(
        status_code,
        &ErrorBody {
            error: message.to_string(),
        },
        request_id,
    )
}

fn tool_error_response(tool: Tool, err: &ToolError, request_id: &Uuid) -> HandlerResponse {
    error!("[API] {} failed: {}", tool, err);
    match err {
        ToolError::EmptyRewrite => error_response(500, MSG_NO_HUMANIZED_TEXT, request_id),
        _ => error_response(500, MSG_INTERNAL, request_id),
    }
}

/// Run one tool against a JSON event and return the envelope.
pub async fn handle<G: TextGenerator>(state: &AppState<G>, tool: Tool, event: &Value) -> HandlerResponse {
    let request_id = Uuid::new_v4();
    let span = info_span!("request", request_id = %request_id, tool = tool.name());
    dispatch(state, tool, event, request_id).instrument(span).await
}

async fn dispatch<G: TextGenerator>(
    state: &AppState<G>,
    tool: Tool,
    event: &Value,
    request_id: Uuid,
) -> HandlerResponse {
    let started = Instant::now();
    info!("[API] event received tool={}", tool);

    let text = match extract_text(event) {
        Ok(text) => text,
        Err(RequestError::InvalidBody) => {
            warn!("[API] invalid request body");
            return error_response(400, MSG_INVALID_BODY, &request_id);
        }
        Err(RequestError::MissingText) => {
            warn!("[API] no input text received");
            let message = match tool {
                Tool::Humanize => MSG_HUMANIZE_TEXT_MISSING,
                _ => MSG_TEXT_REQUIRED,
            };
            return error_response(400, message, &request_id);
        }
    };

    let response = match tool {
        Tool::Humanize => tools::humanize(&state.generator, &state.tools.humanize, &text)
            .await
            .map(|r| json_response(200, &r, &request_id)),
        Tool::DetectAi => tools::detect_ai(&state.generator, &state.tools.ai_detection, text.trim())
            .await
            .map(|r| json_response(200, &r, &request_id)),
        Tool::Plagiarism => {
            tools::estimate_plagiarism(&state.generator, &state.tools.plagiarism, text.trim())
                .await
                .map(|r| json_response(200, &r, &request_id))
        }
    };

    let response = response.unwrap_or_else(|e| tool_error_response(tool, &e, &request_id));
    info!(
        "[API] done tool={} status={} elapsed_ms={}",
        tool,
        response.status_code,
        started.elapsed().as_millis()
    );
    response
}

pub async fn humanize_handler<G: TextGenerator>(state: &AppState<G>, event: &Value) -> HandlerResponse {
    handle(state, Tool::Humanize, event).await
}

pub async fn ai_detector_handler<G: TextGenerator>(state: &AppState<G>, event: &Value) -> HandlerResponse {
    handle(state, Tool::DetectAi, event).await
}

pub async fn plagiarism_handler<G: TextGenerator>(state: &AppState<G>, event: &Value) -> HandlerResponse {
    handle(state, Tool::Plagiarism, event).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tools::fake::FakeGenerator;
    use serde_json::json;

    fn state(generator: FakeGenerator) -> AppState<FakeGenerator> {
        AppState::new(generator, ToolsConfig::default())
    }

    fn body_json(resp: &HandlerResponse) -> Value {
        serde_json::from_str(&resp.body).unwrap()
    }

    #[test]
    fn test_extract_text_from_string_body() {
        let event = json!({"body": "{\"text\": \"  hello there \"}"});
        assert_eq!(extract_text(&event).unwrap(), "  hello there ");
    }

    #[test]
    fn test_extract_text_direct_and_object_body() {
        assert_eq!(extract_text(&json!({"text": "hi"})).unwrap(), "hi");
        assert_eq!(extract_text(&json!({"body": {"text": "hi"}})).unwrap(), "hi");
    }

    #[test]
    fn test_extract_text_errors() {
        assert_eq!(
            extract_text(&json!({"body": "{not json"})),
            Err(RequestError::InvalidBody)
        );
        assert_eq!(extract_text(&json!({"body": 7})), Err(RequestError::InvalidBody));
        assert_eq!(extract_text(&json!({"text": "   "})), Err(RequestError::MissingText));
        assert_eq!(extract_text(&json!({"text": 12})), Err(RequestError::MissingText));
        assert_eq!(extract_text(&json!({})), Err(RequestError::MissingText));
    }

    #[test]
    fn test_extract_text_empty_string_body_falls_back_to_event() {
        assert_eq!(extract_text(&json!({"body": ""})), Err(RequestError::MissingText));
        assert_eq!(extract_text(&json!({"body": "", "text": "hi"})).unwrap(), "hi");
    }

    #[test]
    fn test_tool_from_str() {
        assert_eq!("Humanize".parse::<Tool>().unwrap(), Tool::Humanize);
        assert_eq!("detect".parse::<Tool>().unwrap(), Tool::DetectAi);
        assert_eq!("plagiarism".parse::<Tool>().unwrap(), Tool::Plagiarism);
        assert!("summarize".parse::<Tool>().is_err());
    }

    #[tokio::test]
    async fn test_humanize_handler_success() {
        let state = state(FakeGenerator::replying("The cat sat on the mat."));
        let event = json!({"body": "{\"text\": \"cat mat sat\"}"});
        let resp = humanize_handler(&state, &event).await;

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(resp.headers["Content-Type"], "application/json");
        assert!(resp.headers.contains_key("X-Request-Id"));

        let body = body_json(&resp);
        assert_eq!(body["originalText"], "cat mat sat");
        assert_eq!(body["humanizedText"], "The cat sat on the mat.");
        assert_eq!(body["humanScore"], 50);
        assert_eq!(body["readabilityScore"], 100);
    }

    #[tokio::test]
    async fn test_humanize_handler_missing_text() {
        let generator = FakeGenerator::replying("unused");
        let state = state(generator);
        let resp = humanize_handler(&state, &json!({"text": ""})).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(body_json(&resp)["error"], "Missing 'text' in request");
        assert!(state.generator.last_request().is_none());
    }

    #[tokio::test]
    async fn test_humanize_handler_blank_rewrite() {
        let state = state(FakeGenerator::replying(""));
        let resp = humanize_handler(&state, &json!({"text": "Rewrite me."})).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(body_json(&resp)["error"], "Model returned no humanized text");
    }

    #[tokio::test]
    async fn test_ai_detector_handler_success_trims_input() {
        let reply = r#"{"aiGeneratedProbability": 0.91, "humanProbability": 0.09, "confidence": "High", "patterns": []}"#;
        let state = state(FakeGenerator::replying(reply));
        let resp = ai_detector_handler(&state, &json!({"text": "  four words right here  "})).await;

        assert_eq!(resp.status_code, 200);
        let body = body_json(&resp);
        assert_eq!(body["aiGeneratedProbability"], 91);
        assert_eq!(body["humanProbability"], 9);
        assert_eq!(body["confidence"], "High");
        assert_eq!(body["wordsAnalyzed"], 4);

        let prompt = state.generator.last_request().unwrap().prompt;
        assert!(prompt.contains("\"\"\"four words right here\"\"\""));
    }

    #[tokio::test]
    async fn test_ai_detector_handler_bad_body() {
        let state = state(FakeGenerator::replying("unused"));
        let resp = ai_detector_handler(&state, &json!({"body": "text=hello"})).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(body_json(&resp)["error"], "Invalid request body.");
    }

    #[tokio::test]
    async fn test_ai_detector_handler_empty_string_body() {
        let state = state(FakeGenerator::replying("unused"));
        let resp = ai_detector_handler(&state, &json!({"body": ""})).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(body_json(&resp)["error"], "Text input is required.");
        assert!(state.generator.last_request().is_none());
    }

    #[tokio::test]
    async fn test_ai_detector_handler_malformed_reply() {
        let state = state(FakeGenerator::replying("I think it is probably AI."));
        let resp = ai_detector_handler(&state, &json!({"text": "Some text."})).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(body_json(&resp)["error"], "Internal server error.");
    }

    #[tokio::test]
    async fn test_plagiarism_handler_success() {
        let state = state(FakeGenerator::replying("{\"plagiarismPercentage\": 27}"));
        let resp = plagiarism_handler(&state, &json!({"body": "{\"text\": \"Mitochondria are the powerhouse of the cell.\"}"})).await;
        assert_eq!(resp.status_code, 200);
        assert_eq!(body_json(&resp)["plagiarismPercentage"], 27);
    }

    #[tokio::test]
    async fn test_plagiarism_handler_missing_text() {
        let state = state(FakeGenerator::replying("unused"));
        let resp = plagiarism_handler(&state, &json!({"body": "{}"})).await;
        assert_eq!(resp.status_code, 400);
        assert_eq!(body_json(&resp)["error"], "Text input is required.");
    }

    #[tokio::test]
    async fn test_provider_failure_is_internal_error() {
        let state = state(FakeGenerator::failing(503));
        let resp = plagiarism_handler(&state, &json!({"text": "Some text."})).await;
        assert_eq!(resp.status_code, 500);
        assert_eq!(body_json(&resp)["error"], "Internal server error.");
        assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
    }

    #[tokio::test]
    async fn test_each_request_gets_its_own_id() {
        let state = state(FakeGenerator::replying("{\"plagiarismPercentage\": 1}"));
        let event = json!({"text": "Some text."});
        let first = plagiarism_handler(&state, &event).await;
        let second = plagiarism_handler(&state, &event).await;
        assert_ne!(first.headers["X-Request-Id"], second.headers["X-Request-Id"]);
    }
}
