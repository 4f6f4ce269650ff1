//! Provider adapter trait
//!
//! Defines the one capability every text-generation backend exposes. The
//! router and registry work over `dyn Provider`, never over concrete types.

use super::error::ProviderResult;
use crate::protocol::GenerationParams;
use async_trait::async_trait;

/// Core provider trait that all text-generation providers must implement
#[async_trait]
pub trait Provider: Send + Sync {
    /// Get the provider's registry name
    fn name(&self) -> &str;

    /// Generate text for `prompt`.
    ///
    /// Issues exactly one upstream request. Implementations hold only static
    /// configuration, so concurrent calls on one instance never interfere.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> ProviderResult<String>;
}
