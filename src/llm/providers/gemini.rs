//! Gemini `generateContent` provider.
//!
//! Exposes the single `complete(&str) -> String` interface matching the
//! rest of the `LlmProvider` abstraction. All Gemini wire types are private
//! to this module — callers never see them. The API key travels as a `key`
//! query parameter, matching the public REST surface.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::config::GeminiConfig;
use crate::llm::ProviderError;

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for the Gemini `models/{model}:generateContent` endpoint.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    url: String,
    api_key: String,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl GeminiProvider {
    /// Build a provider from config values and the API key.
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.api_base_url.trim_end_matches('/'),
            config.model,
        );

        Ok(Self {
            client,
            url,
            api_key,
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        })
    }

    /// Send `content` as a single-turn request and return the reply text.
    ///
    /// One round-trip only; no streaming, no multi-turn.
    pub async fn complete(&self, content: &str) -> Result<String, ProviderError> {
        let payload = GenerateContentRequest {
            contents: vec![Content { parts: vec![Part { text: content.to_string() }] }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                top_p: self.top_p,
                top_k: self.top_k,
                max_output_tokens: self.max_output_tokens,
            },
        };

        debug!(url = %self.url, content_len = content.len(), "sending Gemini request");
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Gemini request payload");
        }

        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(url = %self.url, error = %e, "Gemini HTTP request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let parsed = response.json::<GenerateContentResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize Gemini response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        debug!(candidates = parsed.candidates.len(), "received Gemini response");

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProviderError::Request("empty or missing content in response".into()))
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}

// Error envelope used by Google APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = if let Ok(env) = serde_json::from_str::<ErrorEnvelope>(&body) {
        let tag = env.error.status.map(|s| format!(" [{s}]")).unwrap_or_default();
        format!("HTTP {status}{tag}: {}", env.error.message)
    } else {
        format!("HTTP {status}: {body}")
    };

    error!(%status, %message, "Gemini request returned HTTP error");
    Err(ProviderError::Request(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn url_joins_base_and_model() {
        let cfg = Config::test_default();
        let p = GeminiProvider::new(&cfg.llm.gemini, "k".into()).unwrap();
        assert_eq!(p.url, "http://localhost:0/models/test-model:generateContent");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let mut cfg = Config::test_default();
        cfg.llm.gemini.api_base_url = "http://localhost:0/".into();
        let p = GeminiProvider::new(&cfg.llm.gemini, "k".into()).unwrap();
        assert_eq!(p.url, "http://localhost:0/models/test-model:generateContent");
    }

    #[test]
    fn reply_text_deserializes_from_candidates() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello "}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn empty_candidates_deserialize() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
