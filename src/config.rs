use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::Url;

use crate::github::DEFAULT_API_URL;
use crate::pipeline::{DEFAULT_PER_PAGE, PipelineOptions, SEARCH_DEBOUNCE};

/// Organization whose repositories are shown before any search.
pub const DEFAULT_ORGANIZATION: &str = "google";

/// Largest page GitHub will serve.
pub const MAX_PER_PAGE: u32 = 100;

pub const USER_AGENT: &str = concat!("repo-explorer/", env!("REPO_EXPLORER_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub organization: String,
    pub per_page: u32,
    pub debounce: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            per_page: DEFAULT_PER_PAGE,
            debounce: SEARCH_DEBOUNCE,
        }
    }
}

impl Config {
    /// Builds a validated configuration, falling back to defaults for `None`.
    pub fn new(
        api_url: Option<String>,
        organization: Option<String>,
        per_page: Option<u32>,
    ) -> Result<Self> {
        let mut config = Config::default();

        if let Some(api_url) = api_url {
            config.api_url = parse_api_url(&api_url)?;
        }

        if let Some(organization) = organization {
            let organization = organization.trim();
            if organization.is_empty() || organization.contains('/') {
                bail!(
                    "Invalid organization {:?}. Expected a GitHub organization login.",
                    organization
                );
            }
            config.organization = organization.to_string();
        }

        if let Some(per_page) = per_page {
            if !(1..=MAX_PER_PAGE).contains(&per_page) {
                bail!(
                    "Invalid page size {}. Expected a value between 1 and {}.",
                    per_page,
                    MAX_PER_PAGE
                );
            }
            config.per_page = per_page;
        }

        debug!("Using configuration {:?}", config);
        Ok(config)
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            debounce: self.debounce,
            per_page: self.per_page,
        }
    }
}

fn parse_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("Invalid API URL {:?}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Invalid API URL {:?}. Expected an http or https URL.", raw);
    }
    Ok(raw.trim_end_matches('/').to_string())
}
