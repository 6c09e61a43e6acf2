//! Remote method invocation over the backend's HTTP method endpoint.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::Value;
use shared::error::RemoteFailure;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid backend url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
    #[error("undecodable response from '{method}': {source}")]
    Decode {
        method: String,
        source: serde_json::Error,
    },
}

/// Calls named server-side methods with JSON parameters.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call_method(&self, method: &str, params: Value) -> Result<Value, TransportError>;
}

/// [`RpcTransport`] posting to `{base_url}/api/method/{method}`.
#[derive(Clone)]
pub struct HttpRpcTransport {
    http: Client,
    base_url: Url,
    authorization: Option<String>,
}

impl HttpRpcTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        // A trailing slash keeps `join` from replacing the last path segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized).map_err(|source| TransportError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            http: Client::new(),
            base_url,
            authorization: None,
        })
    }

    /// Sends a pre-issued API key pair as `Authorization: token key:secret`.
    pub fn with_api_token(mut self, api_key: &str, api_secret: &str) -> Self {
        self.authorization = Some(format!("token {api_key}:{api_secret}"));
        self
    }

    pub fn method_url(&self, method: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(&format!("api/method/{method}"))
            .map_err(|source| TransportError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl RpcTransport for HttpRpcTransport {
    async fn call_method(&self, method: &str, params: Value) -> Result<Value, TransportError> {
        let url = self.method_url(method)?;
        debug!(%url, "calling remote method");

        let mut request = self
            .http
            .post(url)
            .header(header::ACCEPT, "application/json")
            .json(&params);
        if let Some(authorization) = &self.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RemoteFailure::from_response(status.as_u16(), &body).into());
        }

        serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            method: method.to_string(),
            source,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
