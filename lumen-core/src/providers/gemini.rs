//! Gemini provider implementation
//!
//! Talks to the `generateContent` endpoint. For phrase generation the call
//! carries a response schema so the model is constrained to the phrase array
//! shape upstream.

use super::adapter::Provider;
use super::error::{ProviderError, ProviderResult};
use super::extract_text;
use crate::config::{ProviderSettings, SecretString};
use crate::generation::PHRASE_FIELDS;
use crate::http::HttpClient;
use crate::protocol::GenerationParams;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{json, Map, Value};

/// JSON pointer to the generated text in a `generateContent` answer
const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// Gemini provider implementation
pub struct GeminiProvider {
    api_key: Option<SecretString>,
    url: String,
    http: HttpClient,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(settings: &ProviderSettings, http: HttpClient) -> Self {
        let url = format!(
            "{}/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        Self {
            api_key: settings.configured_key().cloned(),
            url,
            http,
        }
    }

    /// Endpoint this provider posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request body for one generation call
    pub fn request_body(&self, prompt: &str, params: &GenerationParams) -> Value {
        let mut generation_config = json!({
            "temperature": params.temperature,
            "maxOutputTokens": params.max_tokens,
        });

        if params.wants_phrases() {
            generation_config["responseMimeType"] = json!("application/json");
            generation_config["responseSchema"] = phrase_response_schema();
        }

        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [
                        { "text": prompt }
                    ],
                }
            ],
            "generationConfig": generation_config,
        })
    }

    fn headers(&self, api_key: &SecretString) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| ProviderError::configuration("GEMINI_API_KEY is not a valid header value"))?;
        headers.insert("x-goog-api-key", key);
        Ok(headers)
    }
}

/// Gemini response schema: an array of objects with the four required
/// string fields of a phrase
pub fn phrase_response_schema() -> Value {
    let properties: Map<String, Value> = PHRASE_FIELDS
        .iter()
        .map(|field| (field.to_string(), json!({ "type": "STRING" })))
        .collect();

    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": properties,
            "required": PHRASE_FIELDS,
        },
    })
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> ProviderResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::configuration("GEMINI_API_KEY not configured"))?;

        let body = self.request_body(prompt, params);
        let response = self
            .http
            .post_json(self.name(), &self.url, self.headers(api_key)?, &body)
            .await?;

        extract_text(self.name(), &response, TEXT_POINTER)
    }
}
