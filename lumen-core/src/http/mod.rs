//! HTTP client module for calls to upstream AI services
//!
//! This module implements the outbound HTTP layer:
//! - Connection pooling and client management
//! - Fixed per-call timeouts
//! - Mapping of transport failures and non-2xx responses to `ProviderError`
//! - Request ID generation and log truncation

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::{map_transport_error, truncate_for_log, LOG_BODY_LIMIT};
