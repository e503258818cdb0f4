//! Gemini `generateContent` client — the live analysis and vision OCR
//! collaborator.
//!
//! Blocking HTTP; callers on an async runtime go through
//! `tokio::task::spawn_blocking`. Request/response structs cover only the
//! slice of the API this crate uses.

use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::types::{LlmClient, VisionClient};
use super::AnalysisError;
use crate::config::GeminiSettings;

/// Output cap for an analysis line; one record never comes close.
const MAX_OUTPUT_TOKENS: u32 = 512;

/// Low temperature: the response format is rigid, creativity only hurts.
const TEMPERATURE: f32 = 0.1;

pub struct GeminiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            client,
            timeout_secs: settings.timeout_secs,
        }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn post_contents(&self, request: &GenerateContentRequest) -> Result<String, AnalysisError> {
        let response = self
            .client
            .post(self.generate_url())
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    AnalysisError::Connection(self.base_url.clone())
                } else if e.is_timeout() {
                    AnalysisError::HttpClient(format!(
                        "Request timed out after {}s",
                        self.timeout_secs
                    ))
                } else {
                    // reqwest redacts the url (and with it the key) itself;
                    // keep only the error display.
                    AnalysisError::HttpClient(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .map_err(|e| AnalysisError::ResponseShape(e.to_string()))?;

        first_text(parsed)
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str, system: &str) -> Result<String, AnalysisError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt)],
            }],
            system_instruction: (!system.is_empty()).then(|| Content {
                parts: vec![Part::text(system)],
            }),
            generation_config: Some(GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        };
        self.post_contents(&request)
    }
}

impl VisionClient for GeminiClient {
    fn transcribe_image(
        &self,
        image_bytes: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, AnalysisError> {
        let data = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(prompt), Part::inline(mime_type, data)],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            }),
        };
        self.post_contents(&request)
    }
}

// ── Wire types (camelCase per the REST API) ──────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline(mime_type: &str, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data,
            }),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// First text part of the first candidate, trimmed.
fn first_text(response: GenerateContentResponse) -> Result<String, AnalysisError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| content.parts.into_iter().find_map(|p| p.text))
        .map(|t| t.trim().to_string())
        .ok_or_else(|| AnalysisError::ResponseShape("no text candidate in response".into()))
}

// ── Mocks for tests ──────────────────────────────────────────────────

/// Mock LLM client — returns a configurable response.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _prompt: &str, _system: &str) -> Result<String, AnalysisError> {
        Ok(self.response.clone())
    }
}

/// Mock vision client — returns a configurable transcript.
pub struct MockVisionClient {
    transcript: String,
}

impl MockVisionClient {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
        }
    }
}

impl VisionClient for MockVisionClient {
    fn transcribe_image(
        &self,
        _image_bytes: &[u8],
        _mime_type: &str,
        _prompt: &str,
    ) -> Result<String, AnalysisError> {
        Ok(self.transcript.clone())
    }
}
