//! Maps fetch failures onto [`RepositoryError`].

use crate::domain::RepositoryError;
use crate::http::{FetchError, TransportError};

pub fn classify(error: &FetchError) -> RepositoryError {
    match error {
        FetchError::Transport(transport) => classify_transport(transport),
        FetchError::Status { status, .. } => classify_status(*status),
        FetchError::Decode(_) => RepositoryError::ServerError,
    }
}

pub fn classify_transport(error: &TransportError) -> RepositoryError {
    match error {
        TransportError::Connect(_) | TransportError::Timeout(_) | TransportError::Interrupted(_) => {
            RepositoryError::NetworkUnavailable
        }
        TransportError::Other(message) => RepositoryError::unknown(message.clone()),
    }
}

pub fn classify_status(status: u16) -> RepositoryError {
    match status {
        403 => RepositoryError::RateLimitExceeded,
        400..=499 => RepositoryError::InvalidSearchQuery,
        500..=599 => RepositoryError::ServerError,
        other => RepositoryError::unknown(format!("HTTP {}", other)),
    }
}

impl From<FetchError> for RepositoryError {
    fn from(error: FetchError) -> Self {
        classify(&error)
    }
}
