//! Login flow: verify an identity token, then mint a session token

use super::jwks::{JwksVerifier, JwksVerifierConfig};
use super::session::SessionIssuer;
use super::{AuthError, IdentityProvider, IdentityVerifier};
use crate::config::AuthSettings;
use crate::protocol::LoginResponse;
use std::sync::Arc;
use tracing::{info, warn};

/// Exchanges Google and Apple identity tokens for session tokens
pub struct AuthService {
    google: Arc<dyn IdentityVerifier>,
    apple: Arc<dyn IdentityVerifier>,
    issuer: SessionIssuer,
}

impl AuthService {
    pub fn new(
        google: Arc<dyn IdentityVerifier>,
        apple: Arc<dyn IdentityVerifier>,
        issuer: SessionIssuer,
    ) -> Self {
        Self {
            google,
            apple,
            issuer,
        }
    }

    /// Service verifying against the public Google and Apple key sets
    pub fn from_settings(settings: &AuthSettings, client: reqwest::Client) -> Self {
        let google = JwksVerifier::new(
            JwksVerifierConfig::google(settings.google_client_id.clone()),
            client.clone(),
        );
        let apple = JwksVerifier::new(
            JwksVerifierConfig::apple(settings.apple_client_id.clone()),
            client,
        );
        Self::new(
            Arc::new(google),
            Arc::new(apple),
            SessionIssuer::from_settings(settings),
        )
    }

    fn verifier(&self, provider: IdentityProvider) -> &dyn IdentityVerifier {
        match provider {
            IdentityProvider::Google => self.google.as_ref(),
            IdentityProvider::Apple => self.apple.as_ref(),
        }
    }

    /// Verify `id_token` with `provider` and issue a session token
    pub async fn login(
        &self,
        provider: IdentityProvider,
        id_token: &str,
    ) -> Result<LoginResponse, AuthError> {
        let identity = self
            .verifier(provider)
            .verify(id_token)
            .await
            .inspect_err(|e| warn!("{} login rejected: {}", provider, e))?;

        let access_token =
            self.issuer
                .issue(&identity.subject, provider, identity.email.as_deref())?;
        info!("{} login succeeded", provider);

        Ok(LoginResponse {
            access_token,
            user: identity.claims,
        })
    }
}
