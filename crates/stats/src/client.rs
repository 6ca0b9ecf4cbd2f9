use std::fmt;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use portfolio_kit_core::StatsConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::StatsSource;
use crate::error::{FetchError, Result};

/// Path under the API base that addresses the token's owner
const CURRENT_USER_PATH: &str = "/users/current/";

/// Build the `Authorization` header value for a WakaTime token
pub fn basic_authorization(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(token))
}

// A client that can't be built is a setup problem, not a transport failure
fn client_build_error(err: reqwest::Error) -> FetchError {
    FetchError::Config(format!("failed to build HTTP client: {err}"))
}

/// Async client for the coding-activity stats API
///
/// Every call is one GET with no retries and no caching. Clones share the
/// underlying connection pool.
#[derive(Clone)]
pub struct StatsClient {
    http: reqwest::Client,
    // relay + "https://" + api base + "/users/current/"
    url_prefix: String,
}

impl fmt::Debug for StatsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsClient")
            .field("url_prefix", &self.url_prefix)
            .finish_non_exhaustive()
    }
}

impl StatsClient {
    /// Create a client from an explicit config
    ///
    /// # Errors
    ///
    /// Returns an error if the auth header or the HTTP client cannot be built
    pub fn new(config: &StatsConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&basic_authorization(config.token.expose_secret()))
            .map_err(|e| FetchError::Config(format!("invalid authorization header: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(client_build_error)?;

        let relay = config.relay.as_deref().unwrap_or("");
        let url_prefix = format!("{relay}https://{}{CURRENT_USER_PATH}", config.api_base);

        Ok(Self { http, url_prefix })
    }

    /// Full URL for an endpoint; the endpoint is appended verbatim
    #[must_use]
    pub fn request_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.url_prefix)
    }

    /// Fetch an endpoint and return the JSON body unchanged
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Http` on a non-2xx status and
    /// `Decode` when the body is not JSON
    pub async fn fetch(&self, endpoint: &str) -> Result<Value> {
        self.fetch_json(endpoint).await
    }

    /// Fetch an endpoint and decode the body into `T`
    ///
    /// # Errors
    ///
    /// Same as [`StatsClient::fetch`], with `Decode` also covering a JSON
    /// body that doesn't match `T`
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.request_url(endpoint);
        tracing::debug!(%url, "requesting coding stats");

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch an endpoint, logging any failure once and returning `None`
    pub async fn fetch_or_log(&self, endpoint: &str) -> Option<Value> {
        match self.fetch(endpoint).await {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::error!(endpoint, kind = error.kind(), %error, "stats request failed");
                None
            }
        }
    }
}

#[async_trait]
impl StatsSource for StatsClient {
    async fn fetch(&self, endpoint: &str) -> Result<Value> {
        StatsClient::fetch(self, endpoint).await
    }
}
