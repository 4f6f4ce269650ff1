//! Configuration module for Lumen
//!
//! Settings are environment-supplied at process start. An optional `.env`
//! file is read first; real environment variables take precedence over it.

mod env;
mod error;
mod schema;
mod secrets;

pub use env::{parse_provider_list, Lookup};
pub use error::{ConfigError, ConfigResult};
pub use schema::{
    AuthSettings, ProviderSettings, RoutingSettings, ServerSettings, Settings,
    DEFAULT_BIND_ADDR, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_JWT_AUDIENCE,
    DEFAULT_JWT_ISSUER, DEFAULT_JWT_SECRET, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
    DEFAULT_REQUEST_TIMEOUT_SECS, FALLBACK_PROVIDER,
};
pub use secrets::SecretString;

use std::time::Duration;
use tracing::debug;

impl Settings {
    /// Load settings from the process environment, reading `.env` first if
    /// one is present
    pub fn load() -> ConfigResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment file {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::invalid_value(".env", e.to_string()));
            }
        }
        Self::from_env()
    }

    /// Resolve settings from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(&|var| std::env::var(var).ok())
    }

    /// Resolve settings through an arbitrary variable lookup
    pub fn from_lookup(lookup: Lookup<'_>) -> ConfigResult<Self> {
        let timeout_secs = env::read_parsed(
            lookup,
            "AI_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "AI_REQUEST_TIMEOUT_SECS",
                "must be greater than zero",
            ));
        }

        let server = ServerSettings {
            bind_addr: env::read_or(lookup, "BIND_ADDR", DEFAULT_BIND_ADDR),
            request_timeout: Duration::from_secs(timeout_secs),
        };

        let auth = AuthSettings {
            jwt_secret: SecretString::new(env::read_or(lookup, "JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_issuer: env::read_or(lookup, "JWT_ISSUER", DEFAULT_JWT_ISSUER),
            jwt_audience: env::read_or(lookup, "JWT_AUDIENCE", DEFAULT_JWT_AUDIENCE),
            google_client_id: env::read_string(lookup, "GOOGLE_CLIENT_ID"),
            apple_client_id: env::read_string(lookup, "APPLE_CLIENT_ID"),
        };

        let openai = ProviderSettings {
            api_key: env::read_secret(lookup, "OPENAI_API_KEY"),
            base_url: env::read_url(lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)?,
            model: env::read_or(lookup, "OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
        };

        let gemini = ProviderSettings {
            api_key: env::read_secret(lookup, "GEMINI_API_KEY"),
            base_url: env::read_url(lookup, "GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)?,
            model: env::read_or(lookup, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        };

        let routing = RoutingSettings {
            default_order: env::read_provider_list(lookup, "AI_PROVIDER_ORDER")
                .unwrap_or_else(|| vec![FALLBACK_PROVIDER.to_string()]),
            phrases_order: env::read_provider_list(lookup, "AI_PROVIDER_ORDER_PHRASES"),
            explain_order: env::read_provider_list(lookup, "AI_PROVIDER_ORDER_EXPLAIN"),
            translate_order: env::read_provider_list(lookup, "AI_PROVIDER_ORDER_TRANSLATE"),
        };

        Ok(Self {
            env: env::read_or(lookup, "ENV", "local"),
            server,
            auth,
            openai,
            gemini,
            routing,
        })
    }
}
