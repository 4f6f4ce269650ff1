//! JWKS-backed identity token verification
//!
//! Google and Apple both publish their signing keys as a JWKS document. The
//! verifier looks up the token's `kid` there and hands the signature,
//! issuer, audience and expiry checks to `jsonwebtoken`.

use super::{AuthError, IdentityClaims, IdentityProvider, IdentityVerifier};
use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, warn};

pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];
pub const APPLE_JWKS_URL: &str = "https://appleid.apple.com/auth/keys";
pub const APPLE_ISSUER: &str = "https://appleid.apple.com";

/// Timeout of the JWKS document fetch
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to verify one provider's identity tokens
#[derive(Debug, Clone)]
pub struct JwksVerifierConfig {
    pub provider: IdentityProvider,
    /// Environment variable named in the "not configured" error
    pub client_id_var: &'static str,
    /// Expected audience (the app's client id); unset disables login
    pub audience: Option<String>,
    pub issuers: Vec<String>,
    pub jwks_url: String,
    pub algorithms: Vec<Algorithm>,
    /// Clock skew tolerance for `exp`/`nbf`, in seconds
    pub leeway_secs: u64,
}

impl JwksVerifierConfig {
    /// Google sign-in tokens
    pub fn google(client_id: Option<String>) -> Self {
        Self {
            provider: IdentityProvider::Google,
            client_id_var: "GOOGLE_CLIENT_ID",
            audience: client_id,
            issuers: GOOGLE_ISSUERS.iter().map(|s| s.to_string()).collect(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
            algorithms: vec![Algorithm::RS256],
            leeway_secs: 10,
        }
    }

    /// Sign in with Apple tokens
    pub fn apple(client_id: Option<String>) -> Self {
        Self {
            provider: IdentityProvider::Apple,
            client_id_var: "APPLE_CLIENT_ID",
            audience: client_id,
            issuers: vec![APPLE_ISSUER.to_string()],
            jwks_url: APPLE_JWKS_URL.to_string(),
            algorithms: vec![Algorithm::RS256],
            leeway_secs: 0,
        }
    }

    /// Override the JWKS location
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    /// Override the accepted signing algorithms
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }
}

/// Identity verifier backed by a provider's published JWKS
pub struct JwksVerifier {
    config: JwksVerifierConfig,
    client: reqwest::Client,
}

impl JwksVerifier {
    pub fn new(config: JwksVerifierConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn invalid(&self, reason: impl std::fmt::Display) -> AuthError {
        AuthError::InvalidToken(format!(
            "Invalid {} ID token: {}",
            self.config.provider.display_name(),
            reason
        ))
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let name = self.config.provider.display_name();
        let response = self
            .client
            .get(&self.config.jwks_url)
            .timeout(JWKS_FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| AuthError::KeyFetch(format!("Failed to fetch {} keys: {}", name, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} JWKS fetch returned status {}", name, status.as_u16());
            return Err(AuthError::KeyFetch(format!(
                "Failed to fetch {} keys: status {}",
                name,
                status.as_u16()
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(format!("Invalid {} key set: {}", name, e)))
    }

    fn validation(&self, audience: &str) -> Result<Validation, AuthError> {
        let first = self
            .config
            .algorithms
            .first()
            .copied()
            .ok_or_else(|| AuthError::NotConfigured("No signing algorithms configured".into()))?;
        let mut validation = Validation::new(first);
        validation.algorithms = self.config.algorithms.clone();
        validation.leeway = self.config.leeway_secs;
        validation.set_audience(&[audience]);
        validation.set_issuer(self.config.issuers.as_slice());
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        Ok(validation)
    }
}

#[async_trait]
impl IdentityVerifier for JwksVerifier {
    async fn verify(&self, id_token: &str) -> Result<IdentityClaims, AuthError> {
        let name = self.config.provider.display_name();
        let audience = self.config.audience.as_deref().ok_or_else(|| {
            AuthError::NotConfigured(format!("{} not configured", self.config.client_id_var))
        })?;

        let header = decode_header(id_token).map_err(|e| self.invalid(e))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken(format!("Missing kid in {} token header", name)))?;

        let keys = self.fetch_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| AuthError::InvalidToken(format!("{} public key not found", name)))?;
        let key = DecodingKey::from_jwk(jwk).map_err(|e| self.invalid(e))?;

        let data = decode::<Map<String, Value>>(id_token, &key, &self.validation(audience)?)
            .map_err(|e| self.invalid(e))?;

        let claims = IdentityClaims::from_claims(data.claims)?;
        debug!("Verified {} identity token for subject {}", name, claims.subject);
        Ok(claims)
    }
}
