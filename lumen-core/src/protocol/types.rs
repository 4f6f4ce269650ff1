//! Core protocol types for generation and login requests
//!
//! These are the wire shapes accepted and returned by the HTTP surface, plus
//! the parameter bundle handed to each provider call.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 800;
pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;
pub const MAX_TOKENS_LIMIT: u32 = 4000;

/// Task identifier for structured phrase generation
pub const TASK_GENERATE_PHRASES: &str = "generate_phrases";

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Incoming text-generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt text, at least one character
    pub prompt: String,

    /// Sampling temperature in [0, 2]
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Token limit in [1, 4000]
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Optional task identifier driving provider order and output checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Opaque caller metadata, never forwarded to providers
    #[serde(default, alias = "meta", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, Value>>,
}

/// Request rejected at ingress
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("prompt must contain at least 1 character")]
    EmptyPrompt,

    #[error("temperature must be between 0.0 and 2.0, got {0}")]
    TemperatureOutOfRange(f64),

    #[error("max_tokens must be between 1 and 4000, got {0}")]
    MaxTokensOutOfRange(u32),
}

impl GenerationRequest {
    /// Create a request with default sampling parameters
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            task: None,
            metadata: None,
        }
    }

    /// Set the task identifier
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the token limit
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Check the ingress constraints
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.prompt.is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        // NaN fails both comparisons and lands here too
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(RequestError::TemperatureOutOfRange(self.temperature));
        }
        if !(1..=MAX_TOKENS_LIMIT).contains(&self.max_tokens) {
            return Err(RequestError::MaxTokensOutOfRange(self.max_tokens));
        }
        Ok(())
    }

    /// Parameters forwarded to providers for this request
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            task: self.task.clone(),
        }
    }
}

/// The subset of a request passed to each provider call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_tokens: u32,
    pub task: Option<String>,
}

impl GenerationParams {
    /// Copy of these parameters with a different temperature
    pub fn with_temperature(&self, temperature: f64) -> Self {
        Self {
            temperature,
            ..self.clone()
        }
    }

    /// Whether the task asks for structured phrase output
    pub fn wants_phrases(&self) -> bool {
        is_phrases_task(self.task.as_deref())
    }
}

/// Normalized form of a task identifier: trimmed and lower-cased
pub fn normalize_task(task: &str) -> String {
    task.trim().to_lowercase()
}

/// True when `task` is exactly the structured phrase generation task.
/// Unlike provider selection, this match is case and whitespace sensitive.
pub fn is_phrases_task(task: Option<&str>) -> bool {
    task == Some(TASK_GENERATE_PHRASES)
}

/// Generation result returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub text: String,
}

/// Login request carrying a third-party identity token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub id_token: String,
}

/// Successful login: the application session token and the verified claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: Map<String, Value>,
}
