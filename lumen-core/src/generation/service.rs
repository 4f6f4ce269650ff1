//! Request orchestration: selection → chain → generation → output checks

use super::repair::ensure_phrases;
use super::GenerationError;
use crate::config::Settings;
use crate::http::{truncate_for_log, HttpClient};
use crate::protocol::{GenerateResponse, GenerationRequest};
use crate::providers::{ProviderRegistry, SelectionPolicy};
use tracing::info;

/// Characters of the generated text included in the response log line
const RESPONSE_PREVIEW_CHARS: usize = 500;

/// Brokers generation requests across the registered providers.
///
/// Holds only immutable state; share it behind an `Arc` across requests.
pub struct GenerationService {
    registry: ProviderRegistry,
    policy: SelectionPolicy,
}

impl GenerationService {
    pub fn new(registry: ProviderRegistry, policy: SelectionPolicy) -> Self {
        Self { registry, policy }
    }

    /// Service wired with the built-in providers and the configured order
    pub fn from_settings(settings: &Settings, http: HttpClient) -> Self {
        Self::new(
            ProviderRegistry::from_settings(settings, http),
            SelectionPolicy::new(settings.routing.clone()),
        )
    }

    /// Handle one generation request
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateResponse, GenerationError> {
        request.validate()?;

        let task = request.task.as_deref();
        let provider_names = self.policy.resolve(task);
        info!(
            "ai_generate task={} providers={}",
            task.unwrap_or("none"),
            provider_names.join(",")
        );

        let router = self.registry.chain(&provider_names);
        let params = request.params();
        let mut text = router.generate(&request.prompt, &params).await?;

        if params.wants_phrases() {
            text = ensure_phrases(&router, text, &params).await?;
        }

        info!(
            "ai_generate_response task={} chars={} preview={}",
            task.unwrap_or("none"),
            text.chars().count(),
            truncate_for_log(&text, RESPONSE_PREVIEW_CHARS).replace('\n', "\\n")
        );

        Ok(GenerateResponse { text })
    }
}
