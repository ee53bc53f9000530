pub mod coach;
pub mod gemini;
pub mod prompts;
pub mod tracker;

pub use coach::{Coach, LossStreak};
pub use gemini::GeminiClient;
pub use tracker::{AdviceKind, RequestTicket, RequestTracker};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable: no API key configured")]
    Unavailable,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("advisory service returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Text generation backend behind the coach.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// False when no credential is configured; the coach then answers with
    /// its fallback text without calling `generate`.
    fn is_configured(&self) -> bool;

    /// Generated text for `prompt`. An empty string means the model answered
    /// with no text.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError>;
}
