//! HTTP error mapping utilities

use crate::providers::ProviderError;
use tracing::{error, warn};
use uuid::Uuid;

/// Maximum number of characters of an upstream body written to logs
pub const LOG_BODY_LIMIT: usize = 1000;

/// Truncate `text` to at most `max_chars` characters, on a char boundary
pub fn truncate_for_log(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Map a reqwest failure that happened before any response arrived.
///
/// These never carry a status code, so the router treats them as
/// retryable.
pub fn map_transport_error(provider: &str, err: reqwest::Error, request_id: Uuid) -> ProviderError {
    if err.is_timeout() {
        warn!(
            "Request timeout for {} [request_id: {}]",
            provider, request_id
        );
        ProviderError::transport(format!("{} request timed out", provider))
    } else if err.is_connect() {
        error!(
            "Connection error for {} [request_id: {}]: {}",
            provider, request_id, err
        );
        ProviderError::transport(format!("{} connection failed: {}", provider, err))
    } else {
        error!(
            "Request error for {} [request_id: {}]: {}",
            provider, request_id, err
        );
        ProviderError::transport(format!("{} request failed: {}", provider, err))
    }
}
