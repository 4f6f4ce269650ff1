//! Settings schema
//!
//! Typed view of the process configuration. Every value is resolved once at
//! start-up; nothing here is reloaded while the process runs.

use super::secrets::SecretString;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-me";
pub const DEFAULT_JWT_ISSUER: &str = "lumen-backend";
pub const DEFAULT_JWT_AUDIENCE: &str = "lumen-app";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Provider used when no order is configured at all
pub const FALLBACK_PROVIDER: &str = "openai";

/// Root settings object
#[derive(Debug, Clone)]
pub struct Settings {
    /// Deployment label reported by the health endpoint
    pub env: String,
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub openai: ProviderSettings,
    pub gemini: ProviderSettings,
    pub routing: RoutingSettings,
}

/// HTTP listener and outbound call settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
    /// Fixed timeout applied to each outbound provider call
    pub request_timeout: Duration,
}

/// Session token signing and identity provider client ids
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: SecretString,
    pub jwt_issuer: String,
    pub jwt_audience: String,
    pub google_client_id: Option<String>,
    pub apple_client_id: Option<String>,
}

/// Static configuration of one upstream text-generation service
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub model: String,
}

impl ProviderSettings {
    /// API key, if one is configured and not blank
    pub fn configured_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.is_blank())
    }
}

/// Provider order configuration: a global default plus per-category
/// overrides
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingSettings {
    pub default_order: Vec<String>,
    pub phrases_order: Option<Vec<String>>,
    pub explain_order: Option<Vec<String>>,
    pub translate_order: Option<Vec<String>>,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            default_order: vec![FALLBACK_PROVIDER.to_string()],
            phrases_order: None,
            explain_order: None,
            translate_order: None,
        }
    }
}
