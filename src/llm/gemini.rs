//! Gemini `generateContent` client.
//!
//! Thin HTTP wrapper, non-streaming. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{ContentGenerator, LlmError};

pub const SYSTEM_INSTRUCTION: &str = "You are an expert business consultant and digital product strategist. Return the output in clean, formatted Markdown.";

/// Returned when the service answers with no text at all.
pub const EMPTY_CONTENT_FALLBACK: &str = "No content generated.";

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        let endpoint = endpoint_url(&config.base_url, &config.model);
        Ok(Self { http, api_key: config.api_key, endpoint })
    }
}

#[async_trait::async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = build_request(prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        let generated = parse_response(&text)?;
        Ok(generated.unwrap_or_else(|| EMPTY_CONTENT_FALLBACK.to_string()))
    }
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'))
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

// =============================================================================
// BUILD + PARSE
// =============================================================================

fn build_request(prompt: &str) -> ApiRequest<'_> {
    ApiRequest {
        system_instruction: RequestContent { role: None, parts: vec![RequestPart { text: SYSTEM_INSTRUCTION }] },
        contents: vec![RequestContent { role: Some("user"), parts: vec![RequestPart { text: prompt }] }],
    }
}

/// Concatenate the text parts of the first candidate. `None` when empty.
fn parse_response(json: &str) -> Result<Option<String>, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    Ok(if text.is_empty() { None } else { Some(text) })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
