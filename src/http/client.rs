//! HTTP GET collaborator and its reqwest-backed implementation.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::{FetchError, TransportError};

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }

    /// Decodes the body as JSON, checking the status first.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        let response = self.error_for_status()?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

/// Anything that can issue a GET and hand back status plus body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpGet: Send + Sync {
    async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, TransportError>;
}

/// [`HttpGet`] over a shared reqwest [`Client`].
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Wraps a client already configured with headers and user agent.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGet for HttpClient {
    #[tracing::instrument(skip(self, query))]
    async fn get(
        &self,
        url: &str,
        query: Vec<(String, String)>,
    ) -> Result<HttpResponse, TransportError> {
        debug!("GET {} with query {:?}...", url, query);

        let response = self.client.get(url).query(&query).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
