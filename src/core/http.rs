//! HTTP utilities for talking to the upstream stats APIs

use crate::{core::query::QueryParameters, DashError, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;


const USER_AGENT: &str = concat!("sports-dash/", env!("CARGO_PKG_VERSION"));

/// Headers sent with every request.
pub fn common_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h
}

/// Thin GET-only client bound to one base URL.
///
/// Responses are handed back as opaque JSON; mapping them into typed items
/// is the job of the per-endpoint adapters in [`crate::feeds`].
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: Client,
    base_url: String,
}

impl ResourceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(common_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue a GET and parse the body as JSON.
    ///
    /// An empty 2xx body is returned as `Value::Null`.
    pub async fn get(&self, path: &str, params: &QueryParameters) -> Result<Value> {
        let url = self.url_for(path);
        debug!(url = %url, query = %params.to_query_string(), "GET");

        let response = self
            .http
            .get(&url)
            .query(&params.to_pairs())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DashError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
