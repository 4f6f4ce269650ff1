//! Application session tokens

use super::{AuthError, IdentityProvider};
use crate::config::{AuthSettings, SecretString};
use jsonwebtoken::{encode, get_current_timestamp, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

/// Session lifetime: seven days
pub const SESSION_TTL_SECS: u64 = 60 * 60 * 24 * 7;

/// Claims of an application session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub iss: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
    pub sub: String,
    pub provider: String,
    pub email: Option<String>,
}

/// Mints HS256 session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    secret: SecretString,
    issuer: String,
    audience: String,
}

impl SessionIssuer {
    pub fn new(secret: SecretString, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.jwt_secret.clone(),
            settings.jwt_issuer.clone(),
            settings.jwt_audience.clone(),
        )
    }

    /// Claims for a session starting now
    pub fn claims_for(
        &self,
        subject: &str,
        provider: IdentityProvider,
        email: Option<&str>,
    ) -> SessionClaims {
        let now = get_current_timestamp();
        SessionClaims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + SESSION_TTL_SECS,
            sub: subject.to_string(),
            provider: provider.as_str().to_string(),
            email: email.map(str::to_string),
        }
    }

    /// Sign a session token for `subject`
    pub fn issue(
        &self,
        subject: &str,
        provider: IdentityProvider,
        email: Option<&str>,
    ) -> Result<String, AuthError> {
        let claims = self.claims_for(subject, provider, email);
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| AuthError::Issue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(SecretString::new("unit-test-secret"), "lumen-backend", "lumen-app")
    }

    #[test]
    fn test_issued_token_round_trips_claims() {
        let token = issuer()
            .issue("user-123", IdentityProvider::Apple, Some("user@example.com"))
            .unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["lumen-app"]);
        validation.set_issuer(&["lumen-backend"]);
        let data = decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"unit-test-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.sub, "user-123");
        assert_eq!(data.claims.provider, "apple");
        assert_eq!(data.claims.email.as_deref(), Some("user@example.com"));
        assert_eq!(data.claims.exp - data.claims.iat, SESSION_TTL_SECS);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issuer()
            .issue("user-123", IdentityProvider::Google, None)
            .unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&["lumen-app"]);
        assert!(decode::<SessionClaims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &validation
        )
        .is_err());
    }
}
