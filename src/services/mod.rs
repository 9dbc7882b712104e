// Textscope Core Services

pub mod text_metrics;
pub mod scoring;
pub mod model_reply;
pub mod config_store;
pub mod providers;
pub mod tools;

pub use config_store::*;
pub use model_reply::{parse_model_reply, ModelReply};
pub use providers::*;
pub use text_metrics::*;

// Re-export scoring and tool entry points
pub use scoring::{
    assemble_humanized,
    human_score,
    readability_score,
    score_text,
    ScoreResult,
    ScoringError,
};
pub use tools::{detect_ai, estimate_plagiarism, humanize, ToolError};
