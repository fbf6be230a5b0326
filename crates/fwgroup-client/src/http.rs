//! HTTP transport shared by the Inventory and ChangeDesk clients
//!
//! Every request carries Basic credentials and is bounded by the configured
//! connect and read timeouts. Nothing is retried: a failed send surfaces as
//! [`GroupClientError::Transport`] and the caller decides what to do.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::GroupClientConfig;
use crate::error::{GroupClientError, Result};

/// Status and body of a completed HTTP exchange
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// HTTP client bound to one service base URL
#[derive(Clone, Debug)]
pub struct ApiHttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    debug: bool,
}

impl ApiHttpClient {
    /// Create a client for `base_url` using the timeouts, TLS and credentials of `config`
    pub fn new(base_url: String, config: &GroupClientConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .danger_accept_invalid_certs(config.allow_insecure)
            .build()
            .map_err(|e| {
                GroupClientError::InvalidConfig(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self::with_http_client(base_url, client, config))
    }

    /// Create a client around a pre-built `reqwest::Client`
    pub fn with_http_client(base_url: String, client: Client, config: &GroupClientConfig) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            debug: config.debug,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL from an API path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request with query parameters, asking for JSON
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<RawResponse> {
        let url = self.build_url(path);
        if self.debug {
            debug!(method = "GET", url = %url, "Sending request");
        }

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await?;

        self.read_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<RawResponse> {
        let url = self.build_url(path);
        if self.debug {
            let payload = serde_json::to_string(body).unwrap_or_default();
            debug!(method = "POST", url = %url, body = %payload, "Sending request");
        }

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        self.read_response(response).await
    }

    async fn read_response(&self, response: Response) -> Result<RawResponse> {
        let status = response.status();
        let body = response.text().await?;
        if self.debug {
            debug!(status = status.as_u16(), body = %body, "Received response");
        }
        Ok(RawResponse { status, body })
    }
}
