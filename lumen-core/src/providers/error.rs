//! Provider error type and the fallthrough classification
//!
//! Every provider reports failures through [`ProviderError`]. The router only
//! looks at `status_code`: the kind is kept for logging and tests.

use std::fmt;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Upstream statuses that let the router fall through to the next provider
pub const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// What went wrong, independent of the upstream status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Required credential is missing
    Configuration,
    /// Upstream answered with a non-2xx status
    Upstream,
    /// Upstream answered 2xx without the generated text
    Parse,
    /// Timeout or connection failure before a response arrived
    Transport,
    /// The resolved provider chain was empty
    NoProviders,
}

/// The single error type providers may raise
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    /// Upstream HTTP status, verbatim; absent for local failures
    pub status_code: Option<u16>,
}

impl ProviderError {
    /// Missing credential or other local configuration problem
    pub fn configuration(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Configuration,
            message: message.into(),
            status_code: None,
        }
    }

    /// Non-2xx upstream response
    pub fn upstream(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Upstream,
            message: body.into(),
            status_code: Some(status_code),
        }
    }

    /// 2xx response without the expected text field
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Parse,
            message: message.into(),
            status_code: None,
        }
    }

    /// Timeout or network failure
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Transport,
            message: message.into(),
            status_code: None,
        }
    }

    /// Empty provider chain
    pub fn no_providers() -> Self {
        Self {
            kind: ProviderErrorKind::NoProviders,
            message: "No AI providers configured".to_string(),
            status_code: None,
        }
    }

    /// Whether another provider may succeed where this one failed.
    ///
    /// Rate limits, upstream 5xx gateway statuses and every status-less
    /// failure qualify; any other upstream status is definitive.
    pub fn is_retryable(&self) -> bool {
        match self.status_code {
            None => true,
            Some(status) => RETRYABLE_STATUS_CODES.contains(&status),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProviderError {}
