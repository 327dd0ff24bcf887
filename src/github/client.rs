use log::debug;
use serde::de::DeserializeOwned;

use crate::http::{FetchError, HttpGet};

use super::api;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Client for the two GitHub endpoints the explorer reads.
pub struct GitHubClient<H: HttpGet> {
    http: H,
    api_url: String,
}

impl<H: HttpGet> GitHubClient<H> {
    #[tracing::instrument(skip(http, api_url))]
    pub fn new(http: H, api_url: &str) -> Self {
        Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Searches all of GitHub, most-starred first.
    #[tracing::instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<api::SearchResponse, FetchError> {
        let url = format!("{}/search/repositories", self.api_url);
        debug!("Searching repositories for {:?} (page {})...", query, page);

        self.get_json(
            &url,
            &[
                ("q", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
            ],
        )
        .await
    }

    /// Lists an organization's repositories, most recently updated first.
    #[tracing::instrument(skip(self))]
    pub async fn list_organization_repos(
        &self,
        organization: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<api::Repository>, FetchError> {
        let url = format!("{}/orgs/{}/repos", self.api_url, organization);
        debug!("Listing repositories of {} (page {})...", organization, page);

        self.get_json(
            &url,
            &[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
                ("sort", "updated".to_string()),
                ("direction", "desc".to_string()),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let query = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        self.http.get(url, query).await?.json()
    }
}
