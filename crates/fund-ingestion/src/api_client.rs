//! Thin authenticated JSON client shared by the provider clients.
//!
//! Each call is exactly one GET: no retries, no caching. Failures are
//! classified at this boundary so callers only ever see
//! [`IngestionError::ProviderUnavailable`] (connect errors, timeouts,
//! non-2xx statuses) or [`IngestionError::MalformedResponse`] (bodies that
//! don't decode into the expected type).

use crate::error::{IngestionError, Provider};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP client bound to one provider.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    http_client: reqwest::Client,
    provider: Provider,
}

impl ApiClient {
    /// Create a client whose every request is bounded by `timeout`.
    pub fn new(provider: Provider, timeout: Duration) -> Result<Self, IngestionError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestionError::Config(format!("failed to build {} client: {}", provider, e)))?;

        Ok(Self {
            http_client,
            provider,
        })
    }

    /// GET `url` with the given `Authorization` header and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        authorization: &str,
    ) -> Result<T, IngestionError> {
        tracing::debug!(provider = %self.provider, path = url.path(), "GET");

        let response = self
            .http_client
            .get(url.clone())
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestionError::unavailable(
                self.provider,
                format!("HTTP {} from {}", status, url.path()),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(provider = %self.provider, path = url.path(), "undecodable body: {}", e);
            IngestionError::malformed(self.provider, format!("{}: {}", url.path(), e))
        })
    }

    fn transport_error(&self, url: &Url, err: reqwest::Error) -> IngestionError {
        let kind = if err.is_timeout() { "timed out" } else { "request failed" };
        IngestionError::unavailable(self.provider, format!("{} {}: {}", url.path(), kind, err))
    }
}

/// Parse a provider base URL, rejecting empty and non-hierarchical ones.
pub(crate) fn parse_base_url(provider: Provider, raw: &str) -> Result<Url, IngestionError> {
    if raw.trim().is_empty() {
        return Err(IngestionError::InvalidInput(format!("{} base URL must not be empty", provider)));
    }

    let url = Url::parse(raw.trim())
        .map_err(|e| IngestionError::InvalidInput(format!("invalid {} base URL {:?}: {}", provider, raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(IngestionError::InvalidInput(format!(
            "{} base URL {:?} cannot carry a path",
            provider, raw
        )));
    }

    Ok(url)
}

/// Append path segments to a base URL. Segments are percent-encoded and a
/// trailing slash on the base is ignored.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
