//! Builds the HTTP stack and repository source from configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};

use crate::{
    config::{Config, USER_AGENT},
    github::GitHubClient,
    http::HttpClient,
    pipeline::FetchPipeline,
    repository::{GitHubRepositories, RepositorySource},
};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Build an HTTP client that identifies itself and asks for GitHub JSON.
pub fn build_http_client() -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .context("Failed to build HTTP client")?;

    Ok(HttpClient::new(client))
}

/// Build the GitHub-backed repository source from configuration.
pub fn build_repository_source(config: &Config) -> Result<GitHubRepositories<HttpClient>> {
    let http_client = build_http_client()?;
    let client = GitHubClient::new(http_client, &config.api_url);
    debug!("GitHub API at {}", client.api_url());

    let source = GitHubRepositories::new(client, &config.organization);
    debug!("Default listing organization: {}", source.organization());
    Ok(source)
}

/// Start a fetch pipeline over the configured source.
pub fn build_pipeline(config: &Config) -> Result<FetchPipeline> {
    let source: Arc<dyn RepositorySource> = Arc::new(build_repository_source(config)?);
    Ok(FetchPipeline::spawn(source, config.pipeline_options()))
}
