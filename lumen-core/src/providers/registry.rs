//! Fixed name → provider map, resolved once at process start

use super::adapter::Provider;
use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::routing::FallbackRouter;
use crate::config::Settings;
use crate::http::HttpClient;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registry of the providers this process can route to
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider, sharing one HTTP client
    pub fn from_settings(settings: &Settings, http: HttpClient) -> Self {
        Self::new()
            .with_provider(Arc::new(OpenAIProvider::new(&settings.openai, http.clone())))
            .with_provider(Arc::new(GeminiProvider::new(&settings.gemini, http)))
    }

    /// Register `provider` under its own name, replacing any previous entry
    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.providers.insert(provider.name().to_string(), provider);
        self
    }

    /// Provider registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(name).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Build a router over `names` in order. Unknown names are skipped, not
    /// errors.
    pub fn chain<S: AsRef<str>>(&self, names: &[S]) -> FallbackRouter {
        let providers = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let provider = self.get(name);
                if provider.is_none() {
                    debug!("Skipping unknown provider '{}'", name);
                }
                provider
            })
            .collect();
        FallbackRouter::new(providers)
    }
}
