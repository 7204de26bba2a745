//! HTTP client for the upstream metadata API.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::Client;
use serde::de::IgnoredAny;
use url::Url;

use crate::config::UpstreamConfig;

/// Query parameter carrying the server-held credential.
pub const API_KEY_PARAM: &str = "api_key";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors raised while talking to the upstream.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("invalid upstream base URL `{0}`")]
    BaseUrl(String),

    #[error("upstream request failed")]
    Request(#[source] reqwest::Error),

    #[error("failed to read upstream response body")]
    Body(#[source] reqwest::Error),

    #[error("upstream response is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
}

/// A completed upstream exchange whose body is known to be JSON.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Issues upstream GETs with the credential injected.
///
/// One instance is shared by every request so the connection pool is reused.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl UpstreamClient {
    /// Create a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|_| UpstreamError::BaseUrl(config.base_url.clone()))?;
        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::BaseUrl(config.base_url.clone()));
        }

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(UpstreamError::Client)?;

        if config.api_key.is_empty() {
            tracing::warn!("TMDB_API_KEY is not set; upstream calls will be rejected");
        }

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Build the full upstream URL: base URL, then `segments` as path
    /// segments (each percent-encoded), then `api_key`, then `query`.
    pub fn build_url(&self, segments: &[String], query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url.query_pairs_mut()
            .append_pair(API_KEY_PARAM, &self.api_key)
            .extend_pairs(query);

        url
    }

    /// Perform one GET. Any completed exchange is returned regardless of
    /// status; only transport failures and non-JSON bodies are errors.
    pub async fn get(&self, url: Url) -> Result<UpstreamResponse, UpstreamError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.without_url()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Body(e.without_url()))?;

        serde_json::from_slice::<IgnoredAny>(&body).map_err(UpstreamError::InvalidJson)?;

        Ok(UpstreamResponse { status, body })
    }
}

/// Render a URL for logs with the credential masked.
pub fn redact(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == API_KEY_PARAM {
                (k.into_owned(), "***".to_string())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
