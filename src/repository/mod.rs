//! Repository source: fetch, map and classify in one place.
//!
//! Everything above this module sees only domain types and
//! [`RepositoryError`]; transport failures stop here.

pub mod classify;
pub mod mapper;

use async_trait::async_trait;
use log::{debug, warn};

use crate::domain::{Repository, RepositoryError, SearchResult};
use crate::github::GitHubClient;
use crate::http::HttpGet;

/// Where repositories come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositorySource: Send + Sync {
    /// Searches repositories. Empty or whitespace-only queries are rejected
    /// with [`RepositoryError::InvalidSearchQuery`] without a network call.
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult, RepositoryError>;

    /// Lists the configured organization's repositories.
    async fn organization_repositories(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, RepositoryError>;
}

/// [`RepositorySource`] backed by the GitHub REST API.
pub struct GitHubRepositories<H: HttpGet> {
    client: GitHubClient<H>,
    organization: String,
}

impl<H: HttpGet> GitHubRepositories<H> {
    pub fn new(client: GitHubClient<H>, organization: &str) -> Self {
        Self {
            client,
            organization: organization.to_string(),
        }
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }
}

#[async_trait]
impl<H: HttpGet> RepositorySource for GitHubRepositories<H> {
    #[tracing::instrument(skip(self))]
    async fn search_repositories(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResult, RepositoryError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Rejecting empty search query");
            return Err(RepositoryError::InvalidSearchQuery);
        }

        let response = self
            .client
            .search(query, page, per_page)
            .await
            .map_err(|e| {
                warn!("Search for {:?} failed: {}", query, e);
                RepositoryError::from(e)
            })?;

        if response.incomplete_results {
            debug!("Search for {:?} returned incomplete results", query);
        }

        Ok(mapper::map_search_response(response))
    }

    #[tracing::instrument(skip(self))]
    async fn organization_repositories(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>, RepositoryError> {
        let repos = self
            .client
            .list_organization_repos(&self.organization, page, per_page)
            .await
            .map_err(|e| {
                warn!("Listing {} failed: {}", self.organization, e);
                RepositoryError::from(e)
            })?;

        Ok(repos.into_iter().map(mapper::map_repository).collect())
    }
}

/// For callers that need at least one hit.
pub fn require_results(result: SearchResult) -> Result<SearchResult, RepositoryError> {
    if result.is_empty() {
        Err(RepositoryError::RepositoryNotFound)
    } else {
        Ok(result)
    }
}
