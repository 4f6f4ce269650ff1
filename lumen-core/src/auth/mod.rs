//! Identity login
//!
//! A third-party identity token (Google or Apple) is verified by an
//! [`IdentityVerifier`], and the verified subject is exchanged for an
//! application session token minted by [`SessionIssuer`].

pub mod jwks;
pub mod service;
pub mod session;

pub use jwks::{JwksVerifier, JwksVerifierConfig};
pub use service::AuthService;
pub use session::{SessionClaims, SessionIssuer, SESSION_TTL_SECS};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Login failure; always reported to the caller as unauthorized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The identity provider's client id is not configured
    #[error("{0}")]
    NotConfigured(String),

    /// The token was rejected
    #[error("{0}")]
    InvalidToken(String),

    /// Signing keys could not be fetched
    #[error("{0}")]
    KeyFetch(String),

    /// The session token could not be minted
    #[error("Failed to issue session token: {0}")]
    Issue(String),
}

/// Which identity provider issued a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProvider {
    Google,
    Apple,
}

impl IdentityProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
        }
    }

    /// Label used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Apple => "Apple",
        }
    }
}

impl fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claims of a verified identity token
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityClaims {
    /// Stable subject identifier (`sub`)
    pub subject: String,
    pub email: Option<String>,
    /// Every claim of the token, as received
    pub claims: Map<String, Value>,
}

impl IdentityClaims {
    /// Build from a raw claims object, requiring a string `sub`
    pub fn from_claims(claims: Map<String, Value>) -> Result<Self, AuthError> {
        let subject = claims
            .get("sub")
            .and_then(Value::as_str)
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| AuthError::InvalidToken("Token is missing a subject".to_string()))?
            .to_string();
        let email = claims
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self {
            subject,
            email,
            claims,
        })
    }
}

/// Verifies identity tokens of one provider
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<IdentityClaims, AuthError>;
}
