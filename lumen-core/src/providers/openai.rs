//! OpenAI provider implementation
//!
//! Talks to the Responses API. The API cannot constrain a top-level JSON
//! array with a strict schema, so structured phrase output is left to the
//! downstream validator.

use super::adapter::Provider;
use super::error::{ProviderError, ProviderResult};
use super::extract_text;
use crate::config::{ProviderSettings, SecretString};
use crate::http::HttpClient;
use crate::protocol::GenerationParams;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

/// JSON pointer to the generated text in a Responses API answer
const TEXT_POINTER: &str = "/output/0/content/0/text";

/// OpenAI provider implementation
pub struct OpenAIProvider {
    api_key: Option<SecretString>,
    url: String,
    model: String,
    http: HttpClient,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider
    pub fn new(settings: &ProviderSettings, http: HttpClient) -> Self {
        Self {
            api_key: settings.configured_key().cloned(),
            url: settings.base_url.clone(),
            model: settings.model.clone(),
            http,
        }
    }

    /// Request body for one generation call
    pub fn request_body(&self, prompt: &str, params: &GenerationParams) -> Value {
        json!({
            "model": self.model,
            "input": [
                {
                    "role": "user",
                    "content": [
                        { "type": "input_text", "text": prompt }
                    ],
                }
            ],
            "temperature": params.temperature,
            "max_output_tokens": params.max_tokens,
        })
    }

    fn headers(&self, api_key: &SecretString) -> ProviderResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| ProviderError::configuration("OPENAI_API_KEY is not a valid header value"))?;
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> ProviderResult<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ProviderError::configuration("OPENAI_API_KEY not configured"))?;

        let body = self.request_body(prompt, params);
        let response = self
            .http
            .post_json(self.name(), &self.url, self.headers(api_key)?, &body)
            .await?;

        extract_text(self.name(), &response, TEXT_POINTER)
    }
}
