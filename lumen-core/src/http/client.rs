//! HTTP client implementation using reqwest

use super::error::{map_transport_error, truncate_for_log, LOG_BODY_LIMIT};
use crate::providers::{ProviderError, ProviderResult};
use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};
use uuid::Uuid;

/// Default user agent
const USER_AGENT: &str = concat!("lumen/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client with connection pooling.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client whose calls fail after `request_timeout`
    pub fn new(request_timeout: Duration) -> ProviderResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(Duration::from_secs(10).min(request_timeout))
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| {
                ProviderError::configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    /// Underlying reqwest client, for callers outside the provider path
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// POST a JSON body and return the response text of a 2xx answer.
    ///
    /// A non-2xx answer becomes an upstream error carrying the status and the
    /// full body; the body is logged truncated.
    pub async fn post_json(
        &self,
        provider: &str,
        url: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> ProviderResult<String> {
        let request_id = Uuid::new_v4();
        debug!("POST {} for {} [request_id: {}]", url, provider, request_id);

        let response = self
            .client
            .post(url)
            .headers(headers)
            .header("X-Request-ID", request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| map_transport_error(provider, e, request_id))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_transport_error(provider, e, request_id))?;

        if !status.is_success() {
            error!(
                "{}_error status={} body={} [request_id: {}]",
                provider,
                status.as_u16(),
                truncate_for_log(&text, LOG_BODY_LIMIT),
                request_id
            );
            return Err(ProviderError::upstream(status.as_u16(), text));
        }

        debug!(
            "Response status {} from {} [request_id: {}]",
            status, provider, request_id
        );
        Ok(text)
    }
}
