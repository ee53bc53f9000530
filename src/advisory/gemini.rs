use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::advisory::{AdvisoryError, LanguageModel};
use crate::config::Config;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.iter().map(|p| p.text.as_str()).collect::<String>())
            .unwrap_or_default()
    }
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// `api_key` of `None` (or blank) leaves the client unconfigured; it then
    /// never touches the network.
    pub fn new(api_key: Option<String>, model: &str, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    /// Credential comes from the loaded config, never from the environment
    /// directly.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            cfg.gemini_api_key.clone(),
            &cfg.gemini_model,
            Duration::from_secs(cfg.advisory_timeout_secs),
        )
        .with_base_url(&cfg.gemini_base_url)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: Some("user".to_string()),
            }],
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(512),
                temperature: None,
            }),
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisoryError::Unavailable)?;

        debug!("Gemini generateContent: model={} prompt_len={}", self.model, prompt.len());

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .timeout(self.timeout)
            .json(&Self::build_request(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AdvisoryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateResponse = resp.json().await?;
        Ok(data.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_unconfigured() {
        let c = GeminiClient::new(Some("  ".to_string()), DEFAULT_MODEL, Duration::from_secs(5));
        assert!(!c.is_configured());
        let c = GeminiClient::new(None, DEFAULT_MODEL, Duration::from_secs(5));
        assert!(!c.is_configured());
        let c = GeminiClient::new(Some("key".to_string()), DEFAULT_MODEL, Duration::from_secs(5));
        assert!(c.is_configured());
    }

    #[tokio::test]
    async fn unconfigured_generate_short_circuits() {
        // unroutable base url: any network attempt would surface as Http
        let c = GeminiClient::new(None, DEFAULT_MODEL, Duration::from_secs(1))
            .with_base_url("http://127.0.0.1:9");
        let err = c.generate("hello").await.unwrap_err();
        assert!(matches!(err, AdvisoryError::Unavailable));
    }

    #[test]
    fn endpoint_includes_model() {
        let c = GeminiClient::new(None, "gemini-2.5-flash", Duration::from_secs(5))
            .with_base_url("https://example.test/");
        assert_eq!(
            c.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn request_shape() {
        let json = serde_json::to_value(GeminiClient::build_request("hi")).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
        assert!(json["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"Trust "},{"text":"the plan."}],"role":"model"},"finishReason":"STOP"}]}"#;
        let resp: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.text(), "Trust the plan.");

        let empty: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), "");
    }
}
