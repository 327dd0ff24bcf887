//! User-facing error taxonomy for repository lookups.

use thiserror::Error;

/// What went wrong, phrased for the person using the explorer.
///
/// Display yields the short description; [`failure_reason`] and
/// [`recovery_suggestion`] give the why and the what-next.
///
/// [`failure_reason`]: RepositoryError::failure_reason
/// [`recovery_suggestion`]: RepositoryError::recovery_suggestion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Unable to connect to the internet. Please check your connection and try again.")]
    NetworkUnavailable,

    #[error("Please enter a valid search term.")]
    InvalidSearchQuery,

    #[error("No repositories found for your search. Try different keywords.")]
    RepositoryNotFound,

    #[error("Too many requests. Please wait a moment and try again.")]
    RateLimitExceeded,

    #[error("Something went wrong on our end. Please try again later.")]
    ServerError,

    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl RepositoryError {
    pub fn unknown(detail: impl Into<String>) -> Self {
        RepositoryError::Unknown(detail.into())
    }

    pub fn description(&self) -> String {
        self.to_string()
    }

    pub fn failure_reason(&self) -> String {
        match self {
            RepositoryError::NetworkUnavailable => {
                "Network connection is required to search repositories.".to_string()
            }
            RepositoryError::InvalidSearchQuery => {
                "Search query cannot be empty or contain only whitespace.".to_string()
            }
            RepositoryError::RepositoryNotFound => {
                "No repositories match your search criteria.".to_string()
            }
            RepositoryError::RateLimitExceeded => {
                "GitHub API rate limit has been exceeded.".to_string()
            }
            RepositoryError::ServerError => "GitHub servers are experiencing issues.".to_string(),
            RepositoryError::Unknown(detail) => format!("Unexpected error: {}", detail),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            RepositoryError::NetworkUnavailable => "Check your internet connection and try again.",
            RepositoryError::InvalidSearchQuery => {
                "Enter a search term with at least one character."
            }
            RepositoryError::RepositoryNotFound => {
                "Try searching with different keywords or check your spelling."
            }
            RepositoryError::RateLimitExceeded => "Wait a few minutes before searching again.",
            RepositoryError::ServerError => "Please try again in a few moments.",
            RepositoryError::Unknown(_) => "If the problem persists, please contact support.",
        }
    }
}
