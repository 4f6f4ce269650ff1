//! Provider abstraction, registry, selection policy and fallback router
//!
//! Each provider maps the prompt and generation parameters onto one upstream
//! text-generation API and reports failures as a uniform [`ProviderError`].

pub mod adapter;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod registry;
pub mod routing;
pub mod selection;

pub use adapter::Provider;
pub use error::{ProviderError, ProviderErrorKind, ProviderResult, RETRYABLE_STATUS_CODES};
pub use registry::ProviderRegistry;
pub use routing::FallbackRouter;
pub use selection::{SelectionPolicy, TaskCategory};

// Re-export concrete providers
pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;

use crate::http::{truncate_for_log, LOG_BODY_LIMIT};
use serde_json::Value;
use tracing::error;

/// Pull the generated text out of a 2xx response body.
///
/// A body that is not JSON, or has no string at `pointer`, is a parse error
/// without status code.
pub(crate) fn extract_text(provider: &str, body: &str, pointer: &str) -> ProviderResult<String> {
    let text = serde_json::from_str::<Value>(body)
        .map_err(|e| format!("body is not JSON: {}", e))
        .and_then(|data| {
            data.pointer(pointer)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| format!("no text at {}", pointer))
        });

    text.map_err(|reason| {
        error!(
            "{}_parse_error reason={} body={}",
            provider,
            reason,
            truncate_for_log(body, LOG_BODY_LIMIT)
        );
        ProviderError::parse(format!("Invalid {} response format: {}", provider, reason))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_found() {
        let body = r#"{"output":[{"content":[{"type":"output_text","text":"Hello"}]}]}"#;
        assert_eq!(
            extract_text("openai", body, "/output/0/content/0/text").unwrap(),
            "Hello"
        );
    }

    #[test]
    fn test_extract_text_missing_field() {
        let err = extract_text("gemini", r#"{"candidates":[]}"#, "/candidates/0/content/parts/0/text")
            .unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Parse);
        assert_eq!(err.status_code, None);
        assert!(err.message.starts_with("Invalid gemini response format"));
    }

    #[test]
    fn test_extract_text_not_json() {
        let err = extract_text("openai", "<html>", "/output/0/content/0/text").unwrap_err();
        assert_eq!(err.kind, ProviderErrorKind::Parse);
    }
}
