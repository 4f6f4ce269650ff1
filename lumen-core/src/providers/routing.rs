//! Ordered fallback across a provider chain
//!
//! The router walks its chain strictly in order and never races providers:
//! a provider call may cost quota, so duplicating one is not safe.

use super::adapter::Provider;
use super::error::{ProviderError, ProviderResult};
use crate::protocol::GenerationParams;
use std::sync::Arc;
use tracing::{debug, warn};

/// Primary-with-fallbacks router over an ordered provider chain.
///
/// Built fresh for each request; it holds no state across calls.
pub struct FallbackRouter {
    providers: Vec<Arc<dyn Provider>>,
}

impl FallbackRouter {
    /// Create a router over `providers`, tried in the given order
    pub fn new(providers: Vec<Arc<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// Names of the chained providers, in order
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Generate text with the first provider that succeeds.
    ///
    /// Retryable failures (see [`ProviderError::is_retryable`]) move on to the
    /// next provider; any other failure is returned at once. When every
    /// provider fails retryably the last error is returned.
    pub async fn generate(&self, prompt: &str, params: &GenerationParams) -> ProviderResult<String> {
        let mut last_error: Option<ProviderError> = None;

        for provider in &self.providers {
            match provider.generate(prompt, params).await {
                Ok(text) => {
                    debug!("Provider {} succeeded", provider.name());
                    return Ok(text);
                }
                Err(err) if err.is_retryable() => {
                    warn!(
                        "Provider {} failed (status: {:?}), falling through: {}",
                        provider.name(),
                        err.status_code,
                        crate::http::truncate_for_log(&err.message, 200)
                    );
                    last_error = Some(err);
                }
                Err(err) => {
                    warn!(
                        "Provider {} failed with definitive status {:?}, aborting chain",
                        provider.name(),
                        err.status_code
                    );
                    return Err(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(ProviderError::no_providers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderErrorKind;

    #[tokio::test]
    async fn test_empty_chain_reports_no_providers() {
        let router = FallbackRouter::new(Vec::new());
        let params = GenerationParams {
            temperature: 0.7,
            max_tokens: 800,
            task: None,
        };
        let err = router.generate("hi", &params).await.unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::NoProviders);
        assert_eq!(err.status_code, None);
        assert!(router.is_empty());
    }
}
