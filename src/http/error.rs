//! Failure types for HTTP fetches, kept distinct per failure layer.

use thiserror::Error;

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// DNS resolution failed or the host refused the connection.
    #[error("Failed to connect: {0}")]
    Connect(String),
    /// The request did not complete in time.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// The connection dropped while sending the request or reading the body.
    #[error("Connection interrupted: {0}")]
    Interrupted(String),
    /// Anything the transport could not classify more precisely.
    #[error("Request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        if error.is_timeout() {
            TransportError::Timeout(message)
        } else if error.is_connect() {
            TransportError::Connect(message)
        } else if error.is_request() || error.is_body() {
            TransportError::Interrupted(message)
        } else {
            TransportError::Other(message)
        }
    }
}

/// Everything that can go wrong between issuing a GET and holding a decoded value.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u16, body: String },

    /// The body was not the JSON shape we expected.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
